//! Bearer credential extraction

use axum::http::{header::AUTHORIZATION, HeaderMap};

/// Extract a bearer token from the Authorization header
///
/// Absent header, non-Bearer scheme, and an empty remainder all count as
/// "no credential supplied". Whether that is an error is decided by the
/// guard calling this, not here.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extracts_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_is_no_credential() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_bearer_scheme_is_no_credential() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_empty_bearer_is_no_credential() {
        let headers = headers_with("Bearer ");
        assert_eq!(bearer_token(&headers), None);
    }
}
