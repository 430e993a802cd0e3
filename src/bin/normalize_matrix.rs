// Replay a captured widget matrix through the normalization pipeline.
//
// Usage: normalize_matrix <matrix.json> <fixtures|results>
//
// The matrix file is a JSON array of string arrays. Records are printed to
// stdout as the same JSON document the scraper would write.

use anyhow::{bail, Context, Result};
use fixturescraper::{
    config::Config,
    normalize::{Mode, RawMatrix},
};
use std::{env, fs, io::Write};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (path, mode) = match args.as_slice() {
        [path, mode] => (path, mode.parse::<Mode>()?),
        _ => bail!("usage: normalize_matrix <matrix.json> <fixtures|results>"),
    };

    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let matrix: RawMatrix =
        serde_json::from_str(&text).with_context(|| format!("parsing {} as a matrix", path))?;

    let config = Config::load()?;
    let (records, stats) = config.pipeline().run_with_stats(&matrix, mode);
    eprintln!(
        "{} rows: {} noise, {} rejected, {} records",
        stats.rows,
        stats.noise(),
        stats.rejected,
        stats.records
    );

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &records)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
