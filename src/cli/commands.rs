use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tuido", about = concat!("tuido v", env!("CARGO_PKG_VERSION"), " - tasks by context, in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different config directory (default: <config dir>/tuido)
    #[arg(short = 'C', long = "config-dir", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Log filter for tuido modules (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks grouped by context
    List(ListArgs),
    /// Show completion statistics
    Stats,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only list this context
    #[arg(long)]
    pub context: Option<String>,
}
