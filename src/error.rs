/*
 * Responsibility
 * - HTTP 向けの AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body / WWW-Authenticate)
 * - AuthError を AuthConfig に従って変換 (詳細コード or 汎用 401)
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::services::auth::api_key::{API_KEY_SCHEME, AuthError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    Unauthorized {
        code: &'static str,
        message: String,
        realm: String,
    },
}

impl AppError {
    pub fn unauthorized(err: AuthError, config: &AuthConfig) -> Self {
        let (code, message) = if config.expose_error_codes {
            (err.code(), err.to_string())
        } else {
            ("UNAUTHORIZED", "unauthorized".to_string())
        };

        Self::Unauthorized {
            code,
            message,
            realm: config.realm.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, challenge) = match self {
            AppError::Unauthorized {
                code,
                message,
                realm,
            } => (
                StatusCode::UNAUTHORIZED,
                code,
                message,
                format!("{API_KEY_SCHEME} realm=\"{realm}\""),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        let mut response = (status, Json(body)).into_response();
        // realm は AuthConfig 読み込み時に検証済み。手組みの不正値ならヘッダを付けない
        if let Ok(value) = HeaderValue::from_str(&challenge) {
            response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
        }
        response
    }
}
