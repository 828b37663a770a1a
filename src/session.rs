use axum::http::{header, HeaderMap};

/// Cookie pair that marks a browser session as authenticated.
///
/// The value is a static token, not a per-user credential: anyone who
/// copies the cookie is indistinguishable from the real user. A signed or
/// opaque session token is the production-grade replacement.
pub const SESSION_COOKIE_NAME: &str = "signaldash-auth";
pub const SESSION_COOKIE_VALUE: &str = "authenticated";

/// True iff the raw `Cookie` header carries the exact session pair.
///
/// Pairs are matched whole, so `signaldash-auth=authenticatedXYZ` does not
/// count.
pub fn is_authenticated(cookie_header: &str) -> bool {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == SESSION_COOKIE_NAME && value == SESSION_COOKIE_VALUE)
}

/// Convenience for handlers: the `Cookie` header as a str, or "".
pub fn cookie_header(headers: &HeaderMap) -> &str {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `Set-Cookie` value issued after a successful login.
pub fn set_cookie_header(max_age_secs: u64) -> String {
    format!("{SESSION_COOKIE_NAME}={SESSION_COOKIE_VALUE}; HttpOnly; Path=/; Max-Age={max_age_secs}")
}
