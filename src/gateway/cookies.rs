use chrono::DateTime;

/// A `Set-Cookie` value that deletes `name` at path `/`.
pub fn expired_cookie(name: &str) -> String {
    let epoch = DateTime::from_timestamp(1, 0).unwrap_or_default();
    format!(
        "{}=; Path=/; Max-Age=0; Expires={}",
        name,
        epoch.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}
