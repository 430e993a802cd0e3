// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info};
use url::Url;

use crate::fetch::RenderOptions;
use crate::normalize::{ColumnContract, Pipeline};

/// Env var naming a YAML config file.
pub const CONFIG_ENV: &str = "FIXTURESCRAPER_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "fixturescraper.yaml";

const BASE: &str = "https://systontigers.github.io/syston-town-tigers";

/// How pages are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Headless Chrome; waits for the widget script to fill the region.
    #[default]
    Browser,
    /// Single HTTP GET; only for pages that serve the widget rows in HTML.
    Http,
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererKind::Browser => f.write_str("browser"),
            RendererKind::Http => f.write_str("http"),
        }
    }
}

/// Run configuration. Every field has a default; a YAML file only needs the
/// keys it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub fixtures_url: String,
    pub results_url: String,
    pub widget_selector: String,
    pub renderer: RendererKind,
    pub render_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub user_agent: String,
    pub fixtures_path: PathBuf,
    pub results_path: PathBuf,
    pub header_sniffing: bool,
    pub fixtures_columns: ColumnContract,
    pub results_columns: ColumnContract,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixtures_url: format!("{BASE}/team-fixtures.html"),
            results_url: format!("{BASE}/team-results.html"),
            widget_selector: "#lrep455713059".into(),
            renderer: RendererKind::Browser,
            render_timeout_secs: 30,
            poll_interval_ms: 250,
            user_agent: concat!("fixturescraper/", env!("CARGO_PKG_VERSION")).into(),
            fixtures_path: PathBuf::from("fixtures.json"),
            results_path: PathBuf::from("results.json"),
            header_sniffing: false,
            fixtures_columns: ColumnContract::fixtures(),
            results_columns: ColumnContract::results(),
        }
    }
}

impl Config {
    /// `$FIXTURESCRAPER_CONFIG`, else `./fixturescraper.yaml` if it exists,
    /// else defaults; then `FA_FIXTURES_URL` / `FA_RESULTS_URL` overrides.
    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()));

        let mut cfg = match path {
            Some(p) => Self::from_file(&p)?,
            None => {
                debug!("no config file; using defaults");
                Self::default()
            }
        };
        cfg.apply_env(|key| env::var(key).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        let cfg = Self::from_yaml(&text).with_context(|| format!("parsing {:?}", path))?;
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("FA_FIXTURES_URL").filter(|s| !s.trim().is_empty()) {
            self.fixtures_url = url.trim().to_owned();
        }
        if let Some(url) = var("FA_RESULTS_URL").filter(|s| !s.trim().is_empty()) {
            self.results_url = url.trim().to_owned();
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("fixtures_url", &self.fixtures_url),
            ("results_url", &self.results_url),
        ] {
            Url::parse(url).with_context(|| format!("{name} {url:?} is not a valid URL"))?;
        }
        anyhow::ensure!(
            self.render_timeout_secs > 0,
            "render_timeout_secs must be positive"
        );
        anyhow::ensure!(
            self.poll_interval_ms > 0,
            "poll_interval_ms must be positive"
        );
        anyhow::ensure!(
            self.results_columns.score.is_some(),
            "results_columns needs a score position"
        );
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            widget_selector: self.widget_selector.clone(),
            timeout: Duration::from_secs(self.render_timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline {
            fixtures: self.fixtures_columns.clone(),
            results: self.results_columns.clone(),
            header_sniffing: self.header_sniffing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_deployed_pages() {
        let cfg = Config::default();
        assert!(cfg.fixtures_url.ends_with("/team-fixtures.html"));
        assert!(cfg.results_url.ends_with("/team-results.html"));
        assert_eq!(cfg.widget_selector, "#lrep455713059");
        assert_eq!(cfg.renderer, RendererKind::Browser);
        assert_eq!(cfg.render_options().timeout, Duration::from_secs(30));
        assert_eq!(cfg.render_options().poll_interval, Duration::from_millis(250));
        assert_eq!(cfg.pipeline(), Pipeline::default());
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let cfg = Config::from_yaml(
            "render_timeout_secs: 5\nheader_sniffing: true\nresults_columns:\n  date: 0\n  competition: 1\n  home: 2\n  away: 3\n  score: 4\n  venue: 5\n  kickoff: 6\n",
        )
        .unwrap();
        assert_eq!(cfg.render_timeout_secs, 5);
        assert!(cfg.header_sniffing);
        assert_eq!(cfg.results_columns.score, Some(4));
        assert_eq!(cfg.results_columns.away, 3);
        assert_eq!(cfg.fixtures_columns, ColumnContract::fixtures());
        assert_eq!(cfg.fixtures_path, PathBuf::from("fixtures.json"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_yaml("fixture_url: https://example.com\n").is_err());
    }

    #[test]
    fn env_overrides_urls() {
        let vars: HashMap<&str, &str> = [
            ("FA_FIXTURES_URL", " https://example.com/f "),
            ("FA_RESULTS_URL", ""),
        ]
        .into_iter()
        .collect();
        let mut cfg = Config::default();
        cfg.apply_env(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.fixtures_url, "https://example.com/f");
        assert_eq!(cfg.results_url, Config::default().results_url);
    }

    #[test]
    fn invalid_url_fails_validation() {
        let cfg = Config {
            results_url: "not a url".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn results_contract_without_score_fails_validation() {
        let cfg = Config {
            results_columns: ColumnContract::fixtures(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn reads_config_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "fixtures_path: out/fixtures.json").unwrap();
        let cfg = Config::from_file(f.path()).unwrap();
        assert_eq!(cfg.fixtures_path, PathBuf::from("out/fixtures.json"));
    }

    #[test]
    fn renderer_and_poll_interval_from_yaml() {
        let cfg = Config::from_yaml("renderer: http\npoll_interval_ms: 100\n").unwrap();
        assert_eq!(cfg.renderer, RendererKind::Http);
        assert_eq!(cfg.renderer.to_string(), "http");
        assert_eq!(cfg.render_options().poll_interval, Duration::from_millis(100));
        assert!(Config::from_yaml("renderer: selenium\n").is_err());
    }

    #[test]
    fn zero_poll_interval_fails_validation() {
        let cfg = Config {
            poll_interval_ms: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }
}
