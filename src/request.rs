//! Transport-facing request type.
//!
//! The transport loop is a collaborator, not part of this crate, so
//! [`Request`] is an owned value the transport builds from whatever HTTP
//! parser it uses. It carries exactly what dispatch needs: method, path,
//! headers (lowercase keys), cookies, and the flat string parameter map
//! assembled from the query string and any form body.

use http::Method;
use std::collections::HashMap;

/// Parsed HTTP request data consumed by [`Router::dispatch`](crate::router::Router::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path with the query string already stripped
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Parsed cookies from the Cookie header
    pub cookies: HashMap<String, String>,
    /// Query string and body parameters, flattened to strings
    pub params: HashMap<String, String>,
}

impl Request {
    /// Build a request from a method and a request target. Query parameters
    /// in the target are parsed into `params`; the stored `path` excludes
    /// the query string.
    pub fn new(method: Method, target: &str) -> Self {
        let path = target.split('?').next().unwrap_or("/").to_string();
        Self {
            method,
            path,
            headers: HashMap::new(),
            cookies: HashMap::new(),
            params: parse_query_params(target),
        }
    }

    /// Attach a header. Names are lowercased; setting the `Cookie` header
    /// re-derives the cookie map.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self.cookies = parse_cookies(&self.headers);
        self
    }

    /// Attach a body/form parameter.
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }
}

/// Parse cookies out of a lowercase-keyed header map.
pub fn parse_cookies(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .get("cookie")
        .map(|c| {
            c.split(';')
                .filter_map(|pair| {
                    let mut parts = pair.trim().splitn(2, '=');
                    let name = parts.next()?.trim().to_string();
                    let value = parts.next().unwrap_or("").trim().to_string();
                    Some((name, value))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse query string parameters from a request target.
///
/// Extracts everything after the `?` character and URL-decodes parameter
/// names and values.
pub fn parse_query_params(target: &str) -> HashMap<String, String> {
    if let Some(pos) = target.find('?') {
        let query_str = &target[pos + 1..];
        url::form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    } else {
        HashMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookies() {
        let mut h = HashMap::new();
        h.insert("cookie".to_string(), "a=b; c=d".to_string());
        let cookies = parse_cookies(&h);
        assert_eq!(cookies.get("a"), Some(&"b".to_string()));
        assert_eq!(cookies.get("c"), Some(&"d".to_string()));
    }

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/p?x=1&y=2");
        assert_eq!(q.get("x"), Some(&"1".to_string()));
        assert_eq!(q.get("y"), Some(&"2".to_string()));
    }

    #[test]
    fn test_new_strips_query_from_path() {
        let req = Request::new(Method::GET, "/items/7?limit=10");
        assert_eq!(req.path, "/items/7");
        assert_eq!(req.params.get("limit"), Some(&"10".to_string()));
    }

    #[test]
    fn test_cookie_header_populates_cookie_map() {
        let req = Request::new(Method::GET, "/").with_header("Cookie", "sid=abc");
        assert_eq!(req.cookies.get("sid"), Some(&"abc".to_string()));
    }
}
