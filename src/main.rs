use clap::Parser;
use dotenvy::dotenv;
use rssbot::{observability, tasks::scheduler::runner};
use std::path::PathBuf;

/// CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON config file
    #[arg(env = "RSSBOT_CONFIG", default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    observability::init_logging();

    let args = Args::parse();
    log::info!("Using config file {}", args.config.display());

    if let Err(e) = runner::start(args.config).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}
