//! Linkwatch - network quality monitor CLI

use clap::Parser;
use linkwatch::{app::App, cli::Cli, error::AppError, error::Result};
use std::error::Error;
use std::process;

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // .env must be loaded before clap reads its env fallbacks
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.debug, cli.verbose);

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);

        if let Some(source) = e.source() {
            eprintln!("Caused by: {}", source);
        }

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    App::new(cli)?.run().await
}

fn init_logging(debug: bool, verbose: bool) {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

/// Print suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    let suggestion = match error {
        AppError::Config(_) => "Check your .env file or command line arguments.",
        AppError::Validation(_) | AppError::Parse(_) => {
            "Check the format of your URLs, intervals, and sizes."
        }
        AppError::Network(_) => "Check your internet connection and the configured endpoints.",
        AppError::Io(_) => "Check file permissions.",
        AppError::Internal(_) => "This is likely a bug. Please report it with the error details.",
    };

    eprintln!("\nSuggestion: {}", suggestion);
}
