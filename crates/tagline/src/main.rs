//! tagline: print a version label for a git commit
//!
//! The label is the nearest ancestor tag, followed by the distance to it and
//! an abbreviated hash when the commit is not itself tagged.

use std::process::ExitCode;

use clap::Parser;
use tagline::config::Config;
use tracing::error;

fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize tracing subscriber; stdout is reserved for the label
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    let stdout = std::io::stdout();
    match tagline::run(&config, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
