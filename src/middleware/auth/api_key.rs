//! `Authorization: ApiKey <token>` check -> ApiKey into request extensions.
//!
//! Only the header shape and scheme are validated here. Whether the key belongs
//! to anyone is up to the handler / service that receives it.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::services::auth::{ApiKey, extract_api_key};

/// Require a well-formed API key on every route of `router`.
///
/// Example:
/// ```ignore
/// let config = AuthConfig::from_env()?;
/// let notes = middleware::auth::api_key::apply(notes_router, config);
/// app = app.nest("/v1/notes", notes);
/// ```
pub fn apply<S>(router: Router<S>, config: AuthConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(config, api_key_middleware))
}

async fn api_key_middleware(
    State(config): State<AuthConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = authenticate(req.headers(), &config)?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(api_key);

    Ok(next.run(req).await)
}

/// Shared by the middleware and `ApiKeyExtractor`.
pub(crate) fn authenticate(headers: &HeaderMap, config: &AuthConfig) -> Result<ApiKey, AppError> {
    match extract_api_key(headers) {
        Ok(api_key) => {
            tracing::debug!(?api_key, "api key accepted");
            Ok(api_key)
        }
        Err(err) => {
            tracing::warn!(error = ?err, code = err.code(), "api key rejected");
            Err(AppError::unauthorized(err, config))
        }
    }
}
