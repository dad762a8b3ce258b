//! Session token extraction.
//!
//! HTTP requests carry the token in a `sessionId` header, falling back to a
//! `sessionId` cookie.

use http::HeaderMap;

use crate::outcome::SESSION_ID;

/// Anything a session token can be read from.
pub trait SessionTokenSource {
    /// The session token, if one is present and non-blank.
    fn session_token(&self) -> Option<String>;
}

impl SessionTokenSource for str {
    fn session_token(&self) -> Option<String> {
        non_blank(self)
    }
}

impl SessionTokenSource for String {
    fn session_token(&self) -> Option<String> {
        non_blank(self)
    }
}

impl SessionTokenSource for http::request::Parts {
    fn session_token(&self) -> Option<String> {
        token_from_headers(&self.headers)
    }
}

impl<B> SessionTokenSource for http::Request<B> {
    fn session_token(&self) -> Option<String> {
        token_from_headers(self.headers())
    }
}

/// Read the session token from a header map: header first, then cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(non_blank)
        .or_else(|| token_from_cookies(headers))
}

fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_ID)
        .and_then(|(_, value)| non_blank(value))
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
