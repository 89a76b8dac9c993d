use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::middleware::auth::api_key::authenticate;

use super::ApiKey;

/// Extractor that gives handlers the ApiKey of the request.
/// Reuses the key stored by the api_key middleware when it ran; otherwise
/// validates the Authorization header itself, so it also works on routes
/// without the middleware. Rejects with 401.
#[derive(Debug, Clone)]
pub struct ApiKeyExtractor(pub ApiKey);

impl<S> FromRequestParts<S> for ApiKeyExtractor
where
    S: Send + Sync,
    AuthConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(api_key) = parts.extensions.get::<ApiKey>() {
            return Ok(Self(api_key.clone()));
        }

        let config = AuthConfig::from_ref(state);
        authenticate(&parts.headers, &config).map(Self)
    }
}
