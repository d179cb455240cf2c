// src/cli/mod.rs — CLI definition (clap derive)

pub mod chat;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "parlor", about = "Terminal chat playground with a simulated assistant", version)]
pub struct Cli {
    /// Path to a config.toml (default: ~/.parlor/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Fix the RNG seed for a reproducible run
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Override the simulated failure rate (0.0 - 1.0)
    #[arg(long, global = true)]
    pub fail_rate: Option<f64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive chat (default when no subcommand given)
    Chat,
}
