//! Shared application state.
//!
//! Wires the session store, gateway, guard and navigator together the way
//! one open tab of the application sees them.

use std::sync::Arc;

use reqwest::cookie::Jar;

use crate::config::ConfigV1;
use crate::gateway::{AuthGateway, GatewayError, HistoryNavigator};
use crate::guard::RouteGuard;
use crate::store::{SessionStore, Storage};

/// Application state shared by every command handler.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Typed view of the session keys in this tab's storage scope.
    pub session: SessionStore,
    pub navigator: Arc<HistoryNavigator>,
    pub gateway: Arc<AuthGateway>,
    /// Consults the gateway's live status on every navigation.
    pub guard: Arc<RouteGuard>,
}

impl AppState {
    /// Builds a tab over `storage` with a fresh cookie jar.
    pub fn new(config: Arc<ConfigV1>, storage: Arc<dyn Storage>) -> Result<Self, GatewayError> {
        Self::with_cookie_jar(config, storage, Arc::new(Jar::default()))
    }

    /// Builds a tab over `storage` and `cookies`. Pass the same pair to
    /// several states to model several tabs of one origin.
    pub fn with_cookie_jar(
        config: Arc<ConfigV1>,
        storage: Arc<dyn Storage>,
        cookies: Arc<Jar>,
    ) -> Result<Self, GatewayError> {
        let session = SessionStore::new(storage);
        let navigator = Arc::new(HistoryNavigator::new(&config.routes.home));
        let gateway = Arc::new(AuthGateway::with_cookie_jar(
            &config.backend,
            session.clone(),
            navigator.clone(),
            &config.routes.login,
            cookies,
        )?);
        let guard = Arc::new(RouteGuard::new(
            &config.routes,
            gateway.clone(),
            navigator.clone(),
        ));

        Ok(AppState {
            config,
            session,
            navigator,
            gateway,
            guard,
        })
    }
}
