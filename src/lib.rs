/*
 * Responsibility
 * - `Authorization: ApiKey <token>` のパース (services::auth)
 * - 不正なヘッダを 401 で拒否する axum middleware / extractor
 * - 認証設定 (config) と HTTP エラー型 (error)
 */
pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;

pub use api::extractors::ApiKeyExtractor;
pub use config::{AppEnv, AuthConfig, ConfigError};
pub use error::AppError;
pub use services::auth::{API_KEY_SCHEME, ApiKey, AuthError, HeaderSource, extract_api_key};
