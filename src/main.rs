use anyhow::Result;
use clap::Parser;
use surveycoder::{coder, preview, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let config = Config::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!(dir = %config.dir.display(), "startup");

    // ─── 2) code the export ──────────────────────────────────────────
    let summary = coder::run(&config)?;

    // ─── 3) report ───────────────────────────────────────────────────
    println!("✅ Saved coded results to {}", summary.output.display());
    print!("{}", preview::render(&summary.table, config.preview));

    Ok(())
}
