use reqwest::StatusCode;
use tracing::debug;

use super::{Command, HELP};
use crate::forms::{LoginForm, RegistrationForm};
use crate::gateway::GatewayError;
use crate::guard::GuardDecision;
use crate::state::AppState;

pub const LOGIN_FALLBACK: &str = "Invalid username or password. Please try again.";
pub const REGISTER_FALLBACK: &str = "An error occurred during registration. Please try again.";
const REQUEST_FALLBACK: &str = "Request failed. Please try again.";

/// Runs one command against the tab and returns what to print.
pub async fn execute(state: &AppState, command: Command) -> String {
    debug!(command = command.name(), "Executing shell command");
    match command {
        Command::Register(form) => register(state, form).await,
        Command::Login(form) => login(state, form).await,
        Command::Logout => {
            state.gateway.logout();
            state.guard.navigate(&state.config.routes.home);
            "Logged out".to_string()
        }
        Command::Open(path) => match state.guard.navigate(&path) {
            GuardDecision::Allowed => format!("Viewing {}", path),
            GuardDecision::Redirecting { to, from } => {
                format!("{} requires login, redirected to {}", from, to)
            }
        },
        Command::WhoAmI => whoami(state),
        Command::Get(path) => match state.gateway.get(&path).await {
            Ok(response) => response.body,
            Err(GatewayError::Unauthorized) => {
                "Session expired, please log in again".to_string()
            }
            Err(e) => e.user_message(REQUEST_FALLBACK),
        },
        Command::Help => HELP.to_string(),
        Command::Quit => "Bye".to_string(),
    }
}

async fn register(state: &AppState, form: RegistrationForm) -> String {
    let profile = match form.submit() {
        Ok(profile) => profile,
        Err(errors) => return errors.to_string(),
    };

    match state.gateway.register(&profile).await {
        Ok(response) if response.status == StatusCode::CREATED => {
            state.guard.navigate(&state.config.routes.login);
            "Account created. Please log in.".to_string()
        }
        Ok(response) => format!("Registration answered with status {}", response.status),
        Err(e) => e.user_message(REGISTER_FALLBACK),
    }
}

async fn login(state: &AppState, form: LoginForm) -> String {
    let credentials = match form.submit() {
        Ok(credentials) => credentials,
        Err(errors) => return errors.to_string(),
    };

    match state
        .gateway
        .login(&credentials.username, &credentials.password)
        .await
    {
        Ok(_) => {
            state.guard.navigate(&state.config.routes.after_login);
            format!(
                "Welcome, {}",
                state
                    .gateway
                    .current_username()
                    .unwrap_or(credentials.username)
            )
        }
        Err(e) => e.user_message(LOGIN_FALLBACK),
    }
}

fn whoami(state: &AppState) -> String {
    let record = state.session.record();
    if !record.is_authenticated() {
        return "Not logged in".to_string();
    }
    format!(
        "{} (id {}, {}){}",
        record.username.as_deref().unwrap_or("unknown"),
        record.user_id.as_deref().unwrap_or("?"),
        record.role.as_deref().unwrap_or("no role"),
        if record.is_admin() { " [admin]" } else { "" }
    )
}
