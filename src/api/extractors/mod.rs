/*
 * Responsibility
 * - handler で共通利用する extractor (re-export)
 */
pub mod api_key;

pub use api_key::{ApiKey, ApiKeyExtractor};
