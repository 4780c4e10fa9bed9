//! Compiles platform definitions from their declarative massdriver.yaml
//! format into the dist JSON artifacts expected by the backend.

use clap::Parser;
use platform_kit::{build_platforms, BuildOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "build-platforms", about = "Compile platform definitions into dist artifacts")]
struct Cli {
    /// Platform names to build; builds every platform when empty
    platforms: Vec<String>,

    /// Directory containing one subdirectory per platform
    #[arg(long, default_value = "platforms")]
    platforms_dir: PathBuf,

    /// Directory the built artifacts are written to
    #[arg(long, default_value = "_dist")]
    out_dir: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let options = BuildOptions {
        platforms_root: cli.platforms_dir,
        out_dir: cli.out_dir,
    };
    match build_platforms(&options, &cli.platforms) {
        Ok(summary) => {
            tracing::info!(built = summary.built, skipped = summary.skipped, "all platforms built");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "build failed");
            ExitCode::FAILURE
        }
    }
}
