//! dms-client CLI
//!
//! Command-line interface for the data-modeling API

use clap::Parser;
use dms_client::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging on stderr so stdout stays pipeable JSON
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        if e.is_transient() {
            eprintln!("Error (temporary, try again later): {e}");
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}
