use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::config::AppConfig;
use crate::util::normalize_email;
use crate::web::error::ApiError;

pub const ADMIN_EMAIL_HEADER: &str = "x-admin-email";
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Reads admin credentials from the `x-admin-*` headers.
pub fn header_credentials(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|hv| hv.to_str().ok())
            .map(|s| s.to_string())
    };
    (get(ADMIN_EMAIL_HEADER), get(ADMIN_PASSWORD_HEADER))
}

/// Plaintext comparison against the configured admin account.
pub fn is_admin(config: &AppConfig, email: Option<&str>, password: Option<&str>) -> bool {
    let (Some(email), Some(password)) = (email, password) else {
        return false;
    };
    let email = normalize_email(email);
    !email.is_empty()
        && !password.is_empty()
        && email == config.admin_email
        && password == config.admin_password
}

pub async fn require_admin(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let (email, password) = header_credentials(request.headers());

    if is_admin(&config, email.as_deref(), password.as_deref()) {
        return next.run(request).await;
    }

    warn!("🔒 Rejected admin request to {}", request.uri().path());
    ApiError::Unauthorized("admin unauthorized".into()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_check_normalizes_email_only() {
        let config = AppConfig::for_tests();
        assert!(is_admin(&config, Some(" Admin@Example.com "), Some("secret")));
        assert!(!is_admin(&config, Some("admin@example.com"), Some("Secret")));
        assert!(!is_admin(&config, Some("admin@example.com"), None));
        assert!(!is_admin(&config, None, Some("secret")));
        assert!(!is_admin(&config, Some(""), Some("")));
    }
}
