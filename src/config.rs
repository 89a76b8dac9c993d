/*
 * Responsibility
 * - 環境変数から認証設定を読み込む (APP_ENV, AUTH_REALM など)
 * - 設定値のバリデーション (不正なら起動時に失敗させる。リクエスト毎には検証しない)
 */
use std::fmt;

const DEFAULT_REALM: &str = "api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings shared by the API key middleware and extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub app_env: AppEnv,
    // Realm advertised in `WWW-Authenticate: ApiKey realm="..."`.
    pub realm: String,
    // If false, 401 bodies only say UNAUTHORIZED instead of the precise reason.
    pub expose_error_codes: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            app_env: AppEnv::default(),
            realm: DEFAULT_REALM.to_string(),
            expose_error_codes: true,
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, but values come from `lookup` (handy in tests).
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let realm = lookup("AUTH_REALM").unwrap_or_else(|| DEFAULT_REALM.to_string());
        if !is_valid_realm(&realm) {
            return Err(ConfigError::Invalid("AUTH_REALM"));
        }

        let expose_error_codes = match lookup("AUTH_EXPOSE_ERROR_CODES") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid("AUTH_EXPOSE_ERROR_CODES"))?,
            None => !app_env.is_production(),
        };

        Ok(Self {
            app_env,
            realm,
            expose_error_codes,
        })
    }
}

// The realm is written into a quoted-string, so no quotes/backslashes/control chars.
fn is_valid_realm(realm: &str) -> bool {
    !realm.is_empty()
        && realm
            .bytes()
            .all(|b| (0x20..0x7f).contains(&b) && b != b'"' && b != b'\\')
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
