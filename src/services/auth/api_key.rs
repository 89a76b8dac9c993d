//! `Authorization: ApiKey <token>` parsing - core logic.
//!
//! This module is "core-only": it knows nothing about axum extractors,
//! configuration or HTTP responses. Middleware and extractors call
//! `extract_api_key` and decide how to reject.

use std::collections::HashMap;
use std::fmt;

use axum::http::{HeaderMap, HeaderValue, header};

/// The only scheme accepted in the Authorization header (case-sensitive).
pub const API_KEY_SCHEME: &str = "ApiKey";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("no authorization header included")]
    NoAuthHeader,
    #[error("malformed authorization header")]
    MalformedAuthHeader,
    #[error("wrong authorization scheme")]
    WrongAuthScheme,
}

impl AuthError {
    /// Stable machine-readable code (used in JSON error bodies).
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::NoAuthHeader => "NO_AUTH_HEADER",
            AuthError::MalformedAuthHeader => "MALFORMED_AUTH_HEADER",
            AuthError::WrongAuthScheme => "WRONG_AUTH_SCHEME",
        }
    }
}

/// Read-only view over a request's headers.
///
/// Lookup is case-insensitive. When a header carries several values only the
/// first one is returned.
pub trait HeaderSource {
    fn first_value(&self, name: &str) -> Option<&[u8]>;
}

impl HeaderSource for HeaderMap {
    fn first_value(&self, name: &str) -> Option<&[u8]> {
        self.get(name).map(HeaderValue::as_bytes)
    }
}

// Keys differing only in case (`Authorization` / `authorization`) may both be
// present; the smallest key by `Ord` wins so the result never depends on
// hash order. Canonical `Authorization` sorts before `authorization`.
impl HeaderSource for HashMap<String, Vec<String>> {
    fn first_value(&self, name: &str) -> Option<&[u8]> {
        self.iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .and_then(|(_, values)| values.first())
            .map(String::as_bytes)
    }
}

/// Credential token taken from a well-formed `ApiKey` header.
///
/// `Debug` never prints the key so it is safe to log the surrounding struct.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}

/// Extract the API key from `Authorization: ApiKey <token>`.
///
/// - missing or empty header: `NoAuthHeader`
/// - anything other than exactly two non-empty fields separated by one space: `MalformedAuthHeader`
/// - a scheme other than `ApiKey`: `WrongAuthScheme`
pub fn extract_api_key<H>(headers: &H) -> Result<ApiKey, AuthError>
where
    H: HeaderSource + ?Sized,
{
    let raw = match headers.first_value(header::AUTHORIZATION.as_str()) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(AuthError::NoAuthHeader),
    };

    let value = std::str::from_utf8(raw).map_err(|_| AuthError::MalformedAuthHeader)?;

    // Exactly one space: a second one would leave a third field (or an empty one).
    let mut fields = value.split(' ');
    let (Some(scheme), Some(token), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(AuthError::MalformedAuthHeader);
    };

    if scheme.is_empty() || token.is_empty() {
        return Err(AuthError::MalformedAuthHeader);
    }

    if scheme != API_KEY_SCHEME {
        return Err(AuthError::WrongAuthScheme);
    }

    Ok(ApiKey(token.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HashMap<String, Vec<String>> {
        HashMap::from([("Authorization".to_string(), vec![value.to_string()])])
    }

    fn extract(value: &str) -> Result<ApiKey, AuthError> {
        extract_api_key(&headers_with(value))
    }

    #[test]
    fn missing_header_is_no_auth_header() {
        let headers: HashMap<String, Vec<String>> = HashMap::new();
        assert_eq!(extract_api_key(&headers), Err(AuthError::NoAuthHeader));
    }

    #[test]
    fn empty_header_is_no_auth_header() {
        assert_eq!(extract(""), Err(AuthError::NoAuthHeader));
    }

    #[test]
    fn header_without_values_is_no_auth_header() {
        let headers = HashMap::from([("Authorization".to_string(), Vec::<String>::new())]);
        assert_eq!(extract_api_key(&headers), Err(AuthError::NoAuthHeader));
    }

    #[test]
    fn malformed_headers() {
        let cases = [
            ("no spaces", "Bearer:Malformed"),
            ("no spaces, dash", "Bearer-Malformed"),
            ("too many spaces", "Bearer  Malformed"),
            ("no second part", "Bearer "),
            ("no scheme", " GoodApiKey"),
            ("token with space", "ApiKey Good ApiKey"),
            ("only spaces", "   "),
            ("tab delimiter", "ApiKey\tGoodApiKey"),
        ];

        for (name, input) in cases {
            assert_eq!(
                extract(input),
                Err(AuthError::MalformedAuthHeader),
                "case {name}: {input:?}"
            );
        }
    }

    #[test]
    fn wrong_scheme_headers() {
        let cases = [
            ("bearer", "Bearer Well-Formed"),
            ("basic", "Basic dXNlcm5hbWU6cGFzc3dvcmQK"),
            ("lowercase scheme", "apikey GoodApiKey"),
        ];

        for (name, input) in cases {
            assert_eq!(
                extract(input),
                Err(AuthError::WrongAuthScheme),
                "case {name}: {input:?}"
            );
        }
    }

    #[test]
    fn wellformed_headers_return_token() {
        let cases = [
            ("ApiKey GoodApiKey", "GoodApiKey"),
            (
                "ApiKey cdeb1050d144ff339ab5320b768b308e",
                "cdeb1050d144ff339ab5320b768b308e",
            ),
        ];

        for (input, expected) in cases {
            let key = extract(input).expect("wellformed header");
            assert_eq!(key.as_str(), expected);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        for name in ["authorization", "AUTHORIZATION", "AuThOrIzAtIoN"] {
            let headers = HashMap::from([(name.to_string(), vec!["ApiKey k1".to_string()])]);
            assert_eq!(extract_api_key(&headers).map(ApiKey::into_inner), Ok("k1".to_string()));
        }
    }

    #[test]
    fn only_first_value_is_used() {
        let headers = HashMap::from([(
            "Authorization".to_string(),
            vec!["Bearer first".to_string(), "ApiKey second".to_string()],
        )]);
        assert_eq!(extract_api_key(&headers), Err(AuthError::WrongAuthScheme));
    }

    #[test]
    fn keys_differing_in_case_resolve_the_same_way_every_time() {
        for _ in 0..50 {
            let headers = HashMap::from([
                ("authorization".to_string(), vec!["Bearer b".to_string()]),
                ("Authorization".to_string(), vec!["ApiKey a".to_string()]),
                ("AUTHORIZATION".to_string(), vec!["Basic:c".to_string()]),
            ]);
            // "AUTHORIZATION" < "Authorization" < "authorization"
            assert_eq!(extract_api_key(&headers), Err(AuthError::MalformedAuthHeader));

            let headers = HashMap::from([
                ("authorization".to_string(), vec!["Bearer b".to_string()]),
                ("Authorization".to_string(), vec!["ApiKey a".to_string()]),
            ]);
            let key = extract_api_key(&headers).expect("canonical key wins");
            assert_eq!(key.as_str(), "a");
        }
    }

    #[test]
    fn header_map_source() {
        let mut headers = HeaderMap::new();
        headers.append(header::AUTHORIZATION, HeaderValue::from_static("ApiKey k1"));
        headers.append(header::AUTHORIZATION, HeaderValue::from_static("ApiKey k2"));

        let key = extract_api_key(&headers).expect("wellformed header");
        assert_eq!(key.as_str(), "k1");
    }

    #[test]
    fn non_utf8_header_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"ApiKey \xffkey").expect("opaque header value"),
        );
        assert_eq!(extract_api_key(&headers), Err(AuthError::MalformedAuthHeader));
    }

    #[test]
    fn debug_redacts_key() {
        let key = extract("ApiKey super-secret").expect("wellformed header");
        assert!(!format!("{key:?}").contains("super-secret"));
    }
}
