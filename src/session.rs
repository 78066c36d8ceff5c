//! Cookie-token session store.
//!
//! A [`Session`] is a small key-value map scoped to one request/response
//! cycle. It is materialized lazily: a request that never touches the
//! session pays nothing and emits no cookie. When the controller finalizes
//! its response, the session (if it was touched) is serialized exactly once
//! into a `Set-Cookie` header. The token is the URL-safe base64 encoding of
//! the JSON map, so it round-trips losslessly on the next request that
//! presents it; an absent or undecodable token yields a fresh empty session.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::{Map, Value};
use tracing::debug;

use crate::request::Request;
use crate::response::Response;

/// Default name of the session cookie.
pub const DEFAULT_SESSION_COOKIE: &str = "_switchyard_session";

/// Per-request key-value session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    data: Map<String, Value>,
}

impl Session {
    /// An empty session with no backing token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recover a session from the named cookie on `req`. A missing cookie or
    /// a token that fails to decode both produce an empty session.
    pub fn from_request(req: &Request, cookie_name: &str) -> Self {
        match req.cookies.get(cookie_name) {
            Some(token) => Self::from_token(token),
            None => Self::new(),
        }
    }

    /// Decode a session token. Garbage tokens are treated as no session
    /// rather than an error; the client gets a fresh one.
    pub fn from_token(token: &str) -> Self {
        let decoded = match URL_SAFE_NO_PAD.decode(token.as_bytes()) {
            Ok(bytes) => bytes,
            Err(_) => {
                debug!("session token is not valid base64, starting fresh");
                return Self::new();
            }
        };
        match serde_json::from_slice::<Map<String, Value>>(&decoded) {
            Ok(data) => Self { data },
            Err(_) => {
                debug!("session token payload is not a JSON object, starting fresh");
                Self::new()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Serialize the current map into an opaque token.
    pub fn token(&self) -> String {
        // A Map<String, Value> always serializes.
        let json = serde_json::to_vec(&self.data).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Write the session cookie onto the outgoing response. Called exactly
    /// once per cycle, at finalize time.
    pub fn store(&self, res: &mut Response, cookie_name: &str) {
        res.set_header(
            "Set-Cookie",
            &format!("{}={}; Path=/", cookie_name, self.token()),
        );
    }
}
