use std::sync::Arc;

use taskauth::config::{load_config, print_schema};
use taskauth::startup;
use taskauth::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--schema") {
        if let Err(e) = print_schema() {
            eprintln!("Error printing schema: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let path = arg.unwrap_or_else(|| "./config.yaml".to_string());
    let config = match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(Arc::new(config)).await {
        error!("Shell terminated: {}", e);
        std::process::exit(1);
    }
}
