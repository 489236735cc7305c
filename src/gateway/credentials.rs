use base64::{engine::general_purpose, Engine as _};

/// Builds the `Authorization` header value for HTTP Basic authentication:
/// `Basic base64(username:password)`.
pub fn basic_auth_token(username: &str, password: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", encoded)
}
