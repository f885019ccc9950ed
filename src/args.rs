use clap::Parser;
use std::path::PathBuf;

/// put: terminal file manager
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to open (default: current)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Write logs to this file (filter with PUT_LOG, e.g. PUT_LOG=debug)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
