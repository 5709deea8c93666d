use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::ApiError;
use crate::state::AppState;

pub use crate::auth::AuthUser;

/// Username/password pair taken from an `Authorization: Basic` header
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Basic authentication middleware: re-validates credentials on every
/// request and injects the resolved `AuthUser` into request extensions.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = extract_basic_credentials(&headers).map_err(|msg| {
        tracing::debug!("Rejected request without usable credentials: {}", msg);
        ApiError::unauthorized(msg)
    })?;

    let auth_user = state
        .authenticator
        .authenticate(&credentials.username, &credentials.password)
        .await?;

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract and decode Basic credentials from the Authorization header
pub fn extract_basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| "Not authenticated".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    let (scheme, encoded) = auth_str
        .split_once(' ')
        .ok_or_else(|| "Authorization header must use Basic format".to_string())?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err("Authorization header must use Basic format".to_string());
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| "Invalid authentication credentials".to_string())?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| "Invalid authentication credentials".to_string())?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| "Invalid authentication credentials".to_string())?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
