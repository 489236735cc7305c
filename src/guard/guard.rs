use std::sync::Arc;

use tracing::{debug, info};

use super::routes::RouteTable;
use crate::config::RoutesConfig;
use crate::gateway::Navigator;
use crate::store::SessionStatus;

/// Outcome of evaluating a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    /// Send the user to `to`, remembering where they were headed.
    Redirecting { to: String, from: String },
}

/// Gates protected views behind a live authentication check.
///
/// Nothing is cached between evaluations: storage can change under the
/// application at any time (another tab, a 401 handler).
pub struct RouteGuard {
    routes: RouteTable,
    login_path: String,
    status: Arc<dyn SessionStatus>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(
        config: &RoutesConfig,
        status: Arc<dyn SessionStatus>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            routes: RouteTable::new(&config.protected),
            login_path: config.login.clone(),
            status,
            navigator,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decides without side effects.
    pub fn evaluate(&self, path: &str) -> GuardDecision {
        let Some(route) = self.routes.protected_match(path) else {
            return GuardDecision::Allowed;
        };
        if self.status.is_authenticated() {
            debug!(params = ?route.params, "Access to '{}' allowed by '{}'", path, route.pattern);
            GuardDecision::Allowed
        } else {
            GuardDecision::Redirecting {
                to: self.login_path.clone(),
                from: path.to_string(),
            }
        }
    }

    /// Evaluates and moves the navigator accordingly: a push when allowed,
    /// a replace of the current entry with the login view otherwise.
    pub fn navigate(&self, path: &str) -> GuardDecision {
        let decision = self.evaluate(path);
        match &decision {
            GuardDecision::Allowed => self.navigator.push(path),
            GuardDecision::Redirecting { to, from } => {
                info!("Redirecting to login - not authenticated (wanted '{}')", from);
                self.navigator.replace(to, Some(from));
            }
        }
        decision
    }
}
