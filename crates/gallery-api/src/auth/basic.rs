use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use gallery_core::AppError;
use std::sync::Arc;
use subtle::ConstantTimeEq;

const REALM: &str = "Basic realm=\"gallery\"";

/// The single set of credentials allowed to publish.
#[derive(Clone)]
pub struct PublisherCredentials {
    username: String,
    password: String,
}

impl PublisherCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check an `Authorization` header value.
    pub fn verify(&self, header_value: &str) -> bool {
        let Some((user, pass)) = decode_basic(header_value) else {
            return false;
        };
        // Evaluate both comparisons so timing does not reveal which one failed.
        let user_ok = secure_compare(&user, &self.username);
        let pass_ok = secure_compare(&pass, &self.password);
        user_ok & pass_ok
    }
}

impl std::fmt::Debug for PublisherCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublisherCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Decode `Basic <base64(user:pass)>` into its two halves.
fn decode_basic(header_value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

fn unauthorized(message: &str) -> Response {
    let mut response =
        HttpAppError(AppError::Unauthorized(message.to_string())).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM));
    response
}

/// Rejects requests that do not carry the publisher's credentials.
pub async fn publisher_auth(
    State(credentials): State<Arc<PublisherCredentials>>,
    request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header {
        None => unauthorized("Missing authorization header"),
        Some(value) if credentials.verify(value) => next.run(request).await,
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Rejected publisher credentials");
            unauthorized("Invalid credentials")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(user: &str, pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", user, pass)))
    }

    #[test]
    fn test_verify_accepts_matching_credentials() {
        let creds = PublisherCredentials::new("editor", "s3cret:with:colons");
        assert!(creds.verify(&basic("editor", "s3cret:with:colons")));
    }

    #[test]
    fn test_verify_rejects_wrong_credentials() {
        let creds = PublisherCredentials::new("editor", "secret");
        assert!(!creds.verify(&basic("editor", "Secret")));
        assert!(!creds.verify(&basic("admin", "secret")));
        assert!(!creds.verify(&basic("", "")));
    }

    #[test]
    fn test_verify_rejects_malformed_headers() {
        let creds = PublisherCredentials::new("editor", "secret");
        assert!(!creds.verify("Bearer abc"));
        assert!(!creds.verify("Basic !!!not-base64!!!"));
        assert!(!creds.verify(&format!("Basic {}", STANDARD.encode("no-colon"))));
        assert!(!creds.verify(""));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let creds = PublisherCredentials::new("editor", "secret");
        let header = basic("editor", "secret").replacen("Basic", "basic", 1);
        assert!(creds.verify(&header));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = PublisherCredentials::new("editor", "secret");
        assert!(!format!("{:?}", creds).contains("secret"));
    }
}
