//! Scribe Server entry point

use std::process::ExitCode;

use clap::Parser;

use scribe_server::cli::{load_merged_config, run_server, Cli, EXIT_ERROR, EXIT_USAGE_ERROR};
use scribe_server::domain::error::ConfigError;
use scribe_server::infrastructure::observability::{init_tracing, TracingConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_merged_config(cli.config.clone(), cli.to_config()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            let code = match e {
                ConfigError::ValidationError { .. } => EXIT_USAGE_ERROR,
                _ => EXIT_ERROR,
            };
            return ExitCode::from(code);
        }
    };

    if let Err(e) = init_tracing(&TracingConfig::new(config.log_json_or_default())) {
        eprintln!("Error: failed to initialize logging: {e}");
        return ExitCode::from(EXIT_ERROR);
    }

    run_server(config).await
}
