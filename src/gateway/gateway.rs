use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::cookies::expired_cookie;
use super::credentials::basic_auth_token;
use super::error::GatewayError;
use super::navigator::Navigator;
use crate::config::BackendConfig;
use crate::models::{Credentials, RegistrationProfile, SessionIdentity};
use crate::store::{SessionStatus, SessionStore};
use crate::utils::log_throttle::LogThrottle;

const UNAUTHORIZED_LOG_WINDOW: Duration = Duration::from_secs(30);

/// A successful backend response, body already read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Client for the authentication backend.
///
/// Every request goes through [`AuthGateway::execute`], which attaches the
/// stored credential token as it is at send time and turns any 401 into a
/// global logout followed by a full navigation to the login view.
pub struct AuthGateway {
    config: BackendConfig,
    cookie_url: Url,
    http: reqwest::Client,
    cookies: Arc<Jar>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    /// Set after a successful login, cleared whenever the session ends.
    default_authorization: RwLock<Option<String>>,
    unauthorized_log: LogThrottle,
}

impl AuthGateway {
    /// A gateway with a cookie jar of its own.
    pub fn new(
        config: &BackendConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
        login_path: &str,
    ) -> Result<Self, GatewayError> {
        Self::with_cookie_jar(
            config,
            session,
            navigator,
            login_path,
            Arc::new(Jar::default()),
        )
    }

    /// A gateway over `cookies`. Tabs of one origin pass the same jar, so a
    /// logout in one expires the session cookies for all of them.
    pub fn with_cookie_jar(
        config: &BackendConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
        login_path: &str,
        cookies: Arc<Jar>,
    ) -> Result<Self, GatewayError> {
        let cookie_url = Url::parse(&config.base_url).map_err(|e| {
            GatewayError::Client(format!("invalid base_url '{}': {}", config.base_url, e))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // Cookies set by the backend (session id, CSRF token) ride along on
        // later requests.
        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_provider(cookies.clone());
        if let Some(ms) = config.timeout_in_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        info!(
            "Creating auth gateway for '{}' (login view '{}')",
            config.base_url, login_path
        );

        Ok(Self {
            config: config.clone(),
            cookie_url,
            http,
            cookies,
            session,
            navigator,
            login_path: login_path.to_string(),
            default_authorization: RwLock::new(None),
            unauthorized_log: LogThrottle::new(UNAUTHORIZED_LOG_WINDOW),
        })
    }

    /// `POST /register`. Any non-2xx answer comes back as an error for the
    /// caller to render.
    pub async fn register(
        &self,
        profile: &RegistrationProfile,
    ) -> Result<ApiResponse, GatewayError> {
        debug!("Registering account '{}'", profile.username);
        let request = self
            .http
            .post(self.config.endpoint("/register"))
            .json(profile);

        match self.execute(request).await {
            Ok(response) => {
                info!(
                    username = profile.username.as_str(),
                    status = response.status.as_u16(),
                    "Registration accepted"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(username = profile.username.as_str(), error = %e, "Registration failed");
                Err(e)
            }
        }
    }

    /// `POST /login`.
    ///
    /// Any previous session is dropped first. A 200 whose body carries `id`,
    /// `username` and `role` establishes a new session; anything else leaves
    /// the store empty and returns an error.
    pub async fn login(&self, username: &str, password: &str) -> Result<ApiResponse, GatewayError> {
        self.end_session();

        let credentials = Credentials::new(username, password);
        let request = self
            .http
            .post(self.config.endpoint("/login"))
            .json(&credentials);

        let result = match self.execute(request).await {
            Ok(response) => self.establish_session(&credentials, response),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            warn!(username, error = %e, "Login failed");
            self.end_session();
        }
        result
    }

    fn establish_session(
        &self,
        credentials: &Credentials,
        response: ApiResponse,
    ) -> Result<ApiResponse, GatewayError> {
        let body = if response.status == StatusCode::OK {
            serde_json::from_str(&response.body).unwrap_or(Value::Null)
        } else {
            Value::Null
        };
        let identity = SessionIdentity::from_login_body(&body)
            .map_err(|missing| GatewayError::IncompleteLogin { missing })?;

        self.session.save_identity(&identity);
        let token = basic_auth_token(&credentials.username, &credentials.password);
        self.session.store_token(&token);
        *self
            .default_authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);

        info!(
            user_id = identity.user_id.as_str(),
            username = identity.username.as_str(),
            role = identity.role.as_str(),
            "Login succeeded"
        );
        Ok(response)
    }

    /// Ends the session and leaves the protected part of the app. Safe to
    /// call when nobody is logged in.
    pub fn logout(&self) {
        self.end_session();
        if self.navigator.current_path() != self.login_path {
            self.navigator.assign(&self.login_path);
        }
        info!("Logged out");
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, GatewayError> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, GatewayError> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, GatewayError> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, GatewayError> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.endpoint(path))
    }

    /// Sends `request` with the current credentials and applies the 401 policy.
    async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse, GatewayError> {
        let request = match self.authorization() {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(GatewayError::Unauthorized);
        }

        let body = response.text().await?;
        if !status.is_success() {
            debug!("Backend answered {}", status);
            return Err(GatewayError::from_status(status, &body));
        }
        Ok(ApiResponse { status, body })
    }

    /// The token as storage holds it at send time. The login-time default
    /// only mirrors it: once storage loses the token (logout or 401 in any
    /// tab sharing the scope) the default is dropped too.
    fn authorization(&self) -> Option<String> {
        let mut default = self
            .default_authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match self.session.read_token() {
            Some(token) => Some(token),
            None => {
                if default.take().is_some() {
                    debug!("Session ended elsewhere, dropping default authorization");
                }
                None
            }
        }
    }

    fn handle_unauthorized(&self) {
        if let Some(suppressed_count) = self.unauthorized_log.should_emit() {
            warn!(
                suppressed_count,
                "Backend rejected credentials, ending session"
            );
        }
        self.end_session();
        self.navigator.assign(&self.login_path);
    }

    fn end_session(&self) {
        self.session.clear();
        *self
            .default_authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        for name in &self.config.session_cookies {
            self.cookies
                .add_cookie_str(&expired_cookie(name), &self.cookie_url);
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.cookies
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.session.read_user_id()
    }

    pub fn current_username(&self) -> Option<String> {
        self.session.read_username()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }
}

impl SessionStatus for AuthGateway {
    fn is_authenticated(&self) -> bool {
        AuthGateway::is_authenticated(self)
    }
}
