//! Basic-auth admin guard.
//!
//! Implements constant-time comparison to mitigate timing attacks.

mod payload;

pub use payload::validate_new_item;

use std::sync::Arc;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use subtle::ConstantTimeEq;

use crate::errors::{ApiError, AppError};

/// Username and password pulled from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Decode a raw header value. Returns `None` for anything malformed.
    pub fn from_basic_header(value: &str) -> Option<Self> {
        let encoded = value.strip_prefix("Basic ")?.trim();
        let decoded = STANDARD.decode(encoded).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Decides whether a credential pair grants admin access.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credentials: &Credentials) -> bool;
}

/// A single admin account configured at startup.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, credentials: &Credentials) -> bool {
        // Evaluate both halves so timing does not reveal which one failed.
        let user_ok = constant_time_compare(&credentials.username, &self.username);
        let pass_ok = constant_time_compare(&credentials.password, &self.password);
        user_ok & pass_ok
    }
}

/// Admin authentication layer function that takes the verifier as a parameter.
pub async fn basic_auth_layer(
    verifier: Arc<dyn CredentialVerifier>,
    request: Request,
    next: Next,
) -> Response {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(header_value) = header_value else {
        return unauthorized_response("Authentication required");
    };

    match Credentials::from_basic_header(header_value) {
        Some(credentials) if verifier.verify(&credentials) => next.run(request).await,
        Some(credentials) => {
            tracing::warn!("Rejected admin login for user {:?}", credentials.username);
            unauthorized_response("Invalid username or password")
        }
        None => unauthorized_response("Authentication required"),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    ApiError::new(AppError::Unauthorized(message.to_string()), false).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("1025", "1025"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
        assert!(!constant_time_compare("", "not-empty"));
    }

    #[test]
    fn test_parse_basic_header() {
        let creds = Credentials::from_basic_header(&basic("matin:1025")).unwrap();
        assert_eq!(creds.username, "matin");
        assert_eq!(creds.password, "1025");
    }

    #[test]
    fn test_password_may_contain_colons() {
        let creds = Credentials::from_basic_header(&basic("admin:a:b")).unwrap();
        assert_eq!(creds.password, "a:b");
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        assert!(Credentials::from_basic_header("Bearer abc").is_none());
        assert!(Credentials::from_basic_header("Basic !!!not-base64").is_none());
        assert!(Credentials::from_basic_header(&basic("no-colon")).is_none());
        assert!(Credentials::from_basic_header("").is_none());
    }

    #[test]
    fn test_static_credentials_verify() {
        let verifier = StaticCredentials::new("matin", "1025");
        let good = Credentials::from_basic_header(&basic("matin:1025")).unwrap();
        let bad_pass = Credentials::from_basic_header(&basic("matin:1026")).unwrap();
        let bad_user = Credentials::from_basic_header(&basic("admin:1025")).unwrap();

        assert!(verifier.verify(&good));
        assert!(!verifier.verify(&bad_pass));
        assert!(!verifier.verify(&bad_user));
    }
}
