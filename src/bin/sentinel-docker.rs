use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Append one batch of Docker container metrics to today's CSV partition.
#[derive(Parser)]
#[command(name = "sentinel-docker", version, about)]
struct Cli {
    /// Root directory holding the per-domain data trees.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> ExitCode {
    sentinel::init_logging();
    let cli = Cli::parse();

    match sentinel::runner::run_docker(&cli.root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Failed to collect Docker data: {e}");
            ExitCode::FAILURE
        }
    }
}
