//! Main entry point for the stowzip CLI app

use stowzip::cli::{self, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    match cli::run() {
        Commands::Pack { inputs, output, mimetype, base64 } => {
            cli::run_pack(&inputs, &output, mimetype.as_deref(), base64)?;
        }
    }
    Ok(())
}
