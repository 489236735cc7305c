//! Application startup and the interactive shell loop.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::config::ConfigV1;
use crate::shell::{execute, Command};
use crate::state::AppState;
use crate::store::{create_storage, SessionWatcher};

/// Builds the application state and serves commands from stdin until EOF
/// or `quit`.
///
/// # Errors
///
/// Returns an error if the gateway cannot be built or stdin fails.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let storage = create_storage(&config.storage);
    let state = AppState::new(config.clone(), storage)?;
    let watcher = SessionWatcher::spawn(state.session.clone());
    let mut status = watcher.subscribe();

    info!("Shell ready, backend at {}", config.backend.base_url);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => println!("{}", execute(&state, command).await),
                    Err(usage) => println!("{}", usage),
                }
            }
            Ok(()) = status.changed() => {
                let current = status.borrow_and_update().clone();
                debug!(authenticated = current.authenticated, "Auth state changed");
                match current.username {
                    Some(name) if current.authenticated => println!("[signed in as {}]", name),
                    _ if current.authenticated => println!("[signed in]"),
                    _ => println!("[signed out]"),
                }
            }
        }
    }

    info!("Shell closed");
    Ok(())
}
