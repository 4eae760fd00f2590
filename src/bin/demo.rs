use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sharedstore::config::{init_config, CONFIG};
use sharedstore::{get_instance, run_workers};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional TOML file overriding the worker settings.
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries only the store's output lines
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    if let Some(file) = args.config.as_deref() {
        init_config(file).inspect_err(|e| error!("failed to initialize configuration, err: {e}"))?;
    }

    let config = CONFIG.read().clone();
    info!("running demo with {:?}", config);

    let reports = run_workers(get_instance, &config)
        .inspect_err(|e| error!("workers failed, err: {e}"))?;

    info!(
        "{} workers done, store holds {} entries",
        reports.len(),
        get_instance().len()
    );
    Ok(())
}
