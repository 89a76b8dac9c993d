/*
 * Responsibility
 * - 認証情報のパース (axum extractor / config には依存しない)
 */
pub mod api_key;

pub use api_key::{API_KEY_SCHEME, ApiKey, AuthError, HeaderSource, extract_api_key};
