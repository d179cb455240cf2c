// src/main.rs — parlor entry point

use clap::Parser;

use parlor::cli::{chat, Cli, Commands};
use parlor::infra::config::Config;
use parlor::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    // CLI flags override the file
    if let Some(seed) = cli.seed {
        config.responder.seed = Some(seed);
    }
    if let Some(rate) = cli.fail_rate {
        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("--fail-rate must be in [0, 1], got {rate}");
        }
        config.responder.failure_rate = rate;
    }

    match cli.command {
        Some(Commands::Chat) | None => chat::run_chat(&config).await,
    }
}
