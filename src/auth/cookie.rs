//! Access token lookup in the `Cookie` request headers.

use axum::http::{header::COOKIE, HeaderMap};
use axum_extra::extract::cookie::Cookie;

/// Value of the named cookie, or `None` when the header, the cookie, or its value is missing.
///
/// Every `Cookie` header is read as UTF-8; `;`-separated pairs are trimmed and split on the
/// first `=`, and segments without `=` are skipped. Values are taken verbatim (no percent
/// decoding). A later pair with the same name wins.
pub fn access_token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| std::str::from_utf8(value.as_bytes()).ok())
        .flat_map(|raw| Cookie::split_parse(raw))
        .filter_map(Result::ok)
        .filter(|cookie| cookie.name() == cookie_name)
        .last()
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}
