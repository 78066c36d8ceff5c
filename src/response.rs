//! Transport-facing response type.
//!
//! A [`Response`] starts life as a 200 shell and is committed exactly once
//! by the controller context (redirect or content render). The transport
//! collaborator serializes it onto the wire.

use std::collections::HashMap;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Outbound HTTP response: status, header map, body bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    /// A fresh 200 shell with no headers and an empty body.
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// The defined fallback for an unmatched request: 404, empty body.
    pub fn not_found() -> Self {
        Self {
            status: 404,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Set a header, replacing any previous value. Names are lowercased.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// All headers, lowercase-keyed.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Reason phrase for the current status code.
    pub fn reason(&self) -> &'static str {
        status_reason(self.status)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
