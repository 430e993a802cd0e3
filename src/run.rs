// src/run.rs

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::fetch::Renderer;
use crate::normalize::{Mode, PipelineStats};
use crate::output::write_records;

/// What one run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub fixtures_path: PathBuf,
    pub fixtures: PipelineStats,
    pub results_path: PathBuf,
    pub results: PipelineStats,
}

impl RunSummary {
    pub fn line(&self) -> String {
        format!(
            "Wrote {} ({}) and {} ({})",
            self.fixtures_path.display(),
            self.fixtures.records,
            self.results_path.display(),
            self.results.records
        )
    }
}

/// Render both pages, normalize each, then write both documents.
///
/// Both renders must succeed before anything touches disk.
pub async fn scrape<R: Renderer>(config: &Config, renderer: &R) -> Result<RunSummary> {
    let fixtures_matrix = renderer
        .render(&config.fixtures_url)
        .await
        .context("rendering fixtures page")?;
    let results_matrix = renderer
        .render(&config.results_url)
        .await
        .context("rendering results page")?;

    let pipeline = config.pipeline();
    let (fixtures, fixtures_stats) = pipeline.run_with_stats(&fixtures_matrix, Mode::Fixtures);
    let (results, results_stats) = pipeline.run_with_stats(&results_matrix, Mode::Results);

    write_records(&config.fixtures_path, &fixtures)
        .with_context(|| format!("writing {:?}", config.fixtures_path))?;
    write_records(&config.results_path, &results)
        .with_context(|| format!("writing {:?}", config.results_path))?;

    info!(
        fixtures = fixtures_stats.records,
        results = results_stats.records,
        "run complete"
    );
    Ok(RunSummary {
        fixtures_path: config.fixtures_path.clone(),
        fixtures: fixtures_stats,
        results_path: config.results_path.clone(),
        results: results_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::RawMatrix;
    use anyhow::bail;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    struct FakeRenderer {
        pages: HashMap<String, RawMatrix>,
    }

    impl Renderer for FakeRenderer {
        async fn render(&self, url: &str) -> Result<RawMatrix> {
            match self.pages.get(url) {
                Some(m) => Ok(m.clone()),
                None => bail!("timed out waiting for widget on {url}"),
            }
        }
    }

    fn matrix(rows: &[&[&str]]) -> RawMatrix {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn config(dir: &std::path::Path) -> Config {
        Config {
            fixtures_url: "https://example.com/fixtures".into(),
            results_url: "https://example.com/results".into(),
            fixtures_path: dir.join("fixtures.json"),
            results_path: dir.join("results.json"),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn writes_both_documents() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path());
        let renderer = FakeRenderer {
            pages: HashMap::from([
                (
                    cfg.fixtures_url.clone(),
                    matrix(&[
                        &["Date", "Comp", "Home", "Away", "KO", "Venue"],
                        &["12/04/2025", "Cup", "Syston", "Anstey", "14:30", "Memorial Park"],
                    ]),
                ),
                (
                    cfg.results_url.clone(),
                    matrix(&[
                        &["05/04/2025", "", "Syston", "2-1", "Birstall"],
                        &["29/03/2025", "", "Anstey", "P-P", "Syston"],
                    ]),
                ),
            ]),
        };

        let summary = scrape(&cfg, &renderer).await.unwrap();
        assert_eq!(summary.fixtures.records, 1);
        assert_eq!(summary.results.records, 2);
        assert!(summary.line().ends_with("results.json (2)"));

        let fixtures: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&cfg.fixtures_path).unwrap()).unwrap();
        assert_eq!(
            fixtures,
            serde_json::json!([{
                "date": "12/04/2025",
                "matchType": "Cup",
                "home": "Syston",
                "away": "Anstey",
                "venue": "Memorial Park",
                "ko": "14:30"
            }])
        );

        let results: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&cfg.results_path).unwrap()).unwrap();
        assert_eq!(results[0]["homeScore"], 2);
        assert_eq!(results[1]["homeScore"], "");
        assert_eq!(results[1]["awayScore"], "");
    }

    #[tokio::test]
    async fn render_failure_writes_nothing() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path());
        let renderer = FakeRenderer {
            pages: HashMap::from([(cfg.fixtures_url.clone(), matrix(&[&["12/04/2025"]]))]),
        };

        let err = scrape(&cfg, &renderer).await.unwrap_err();
        assert!(format!("{err:#}").contains("rendering results page"));
        assert!(!cfg.fixtures_path.exists());
        assert!(!cfg.results_path.exists());
    }
}
