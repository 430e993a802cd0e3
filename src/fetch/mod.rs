// src/fetch/mod.rs
//
// Render collaborator: load a page, wait for the widget region, hand back the
// raw cell matrix. One navigation per page; a timeout fails the run.

pub mod browser;
pub mod extract;

pub use browser::BrowserSession;
pub use extract::extract_matrix;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, trace};

use crate::normalize::RawMatrix;

/// Anything that can turn a page URL into the widget's cell matrix.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    async fn render(&self, url: &str) -> Result<RawMatrix>;
}

/// Settings a render session is opened with.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub widget_selector: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub user_agent: String,
}

/// Take DOM snapshots of one loaded page until the widget region is
/// populated. Errors once `timeout` has passed.
pub async fn wait_for_widget<F, Fut>(
    opts: &RenderOptions,
    url: &str,
    mut snapshot: F,
) -> Result<RawMatrix>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let wait = async {
        loop {
            let html = snapshot().await?;
            if let Some(matrix) = extract_matrix(&html, &opts.widget_selector)? {
                return Ok::<_, anyhow::Error>(matrix);
            }
            trace!(url, "widget not populated yet");
            tokio::time::sleep(opts.poll_interval).await;
        }
    };
    tokio::time::timeout(opts.timeout, wait).await.map_err(|_| {
        anyhow!(
            "timed out after {:?} waiting for {} on {}",
            opts.timeout,
            opts.widget_selector,
            url
        )
    })?
}

/// Plain HTTP render session for pages whose widget markup is in the served
/// HTML. The widget region is checked once; a page that fills it in with
/// script needs [`BrowserSession`].
pub struct RenderSession {
    client: Client,
    opts: RenderOptions,
}

impl RenderSession {
    pub fn open(opts: RenderOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&opts.user_agent)
            .cookie_store(true)
            .gzip(true)
            .connect_timeout(opts.timeout)
            .build()
            .context("building HTTP client for render session")?;
        debug!(selector = %opts.widget_selector, timeout = ?opts.timeout, "render session opened");
        Ok(Self { client, opts })
    }

    pub fn close(self) {
        debug!("render session closed");
    }

    async fn load(&self, url: &str) -> Result<RawMatrix> {
        let html = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .await
            .with_context(|| format!("Reading text from {}", url))?;

        match extract_matrix(&html, &self.opts.widget_selector)? {
            Some(matrix) => Ok(matrix),
            None => bail!(
                "widget region {} never populated on {}",
                self.opts.widget_selector,
                url
            ),
        }
    }
}

impl Renderer for RenderSession {
    #[instrument(level = "info", skip(self))]
    async fn render(&self, url: &str) -> Result<RawMatrix> {
        let matrix = tokio::time::timeout(self.opts.timeout, self.load(url))
            .await
            .map_err(|_| {
                anyhow!(
                    "timed out after {:?} waiting for {} on {}",
                    self.opts.timeout,
                    self.opts.widget_selector,
                    url
                )
            })??;
        info!(rows = matrix.len(), "widget rendered");
        Ok(matrix)
    }
}
