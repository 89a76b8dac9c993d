/*!
 * API key extractor
 *
 * Responsibility:
 * - 検証済みの ApiKey を handler に提供する
 * - axum 依存は core に閉じ込め、型定義は services::auth に置く
 *
 * Public API:
 * - ApiKey
 * - ApiKeyExtractor
 */

mod core;

pub use crate::services::auth::ApiKey;
pub use self::core::ApiKeyExtractor;
