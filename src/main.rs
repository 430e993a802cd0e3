use anyhow::Result;
use fixturescraper::config::{Config, RendererKind};
use fixturescraper::fetch::{BrowserSession, RenderSession};
use fixturescraper::run;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) config ───────────────────────────────────────────────────
    let config = Config::load()?;
    info!(
        fixtures = %config.fixtures_url,
        results = %config.results_url,
        renderer = %config.renderer,
        "pages to scrape"
    );

    // ─── 3) render, normalize, write ─────────────────────────────────
    let summary = match config.renderer {
        RendererKind::Browser => {
            let session = BrowserSession::open(config.render_options()).await?;
            let summary = run::scrape(&config, &session).await;
            session.close().await;
            summary?
        }
        RendererKind::Http => {
            let session = RenderSession::open(config.render_options())?;
            let summary = run::scrape(&config, &session).await;
            session.close();
            summary?
        }
    };

    println!("{}", summary.line());
    Ok(())
}
