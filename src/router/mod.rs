//! # Router Module
//!
//! Regex-based route matching and request dispatch.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Holding the immutable route table built by [`RouterBuilder`]
//! - Matching incoming requests against (method, pattern) pairs in
//!   registration order — first structural match wins
//! - Extracting named capture groups as path parameters and merging them
//!   over request parameters
//! - Driving the controller invocation lifecycle for the matched route
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Build**: [`RouterBuilder::build`] compiles every registered pattern
//!    into an anchored regex and resolves every action name against its
//!    controller. Any failure here refuses to produce a router at all —
//!    broken patterns are a startup error, never a request-time surprise.
//!
//! 2. **Dispatch**: for each request, routes are scanned in registration
//!    order. Matching is method equality followed by a full-path regex
//!    match against the path with the query string stripped. Overlapping
//!    routes are legal; the earlier registration silently shadows later
//!    ones, so callers order routes deliberately.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use http::Method;
//! use switchyard::{Controller, Request, Router};
//!
//! let items = Arc::new(Controller::new("items").action("show", |ctx| {
//!     let id = ctx.param("id").unwrap_or_default().to_string();
//!     ctx.render_content(format!("item {id}"), "text/plain")
//! }));
//!
//! let router = Router::builder()
//!     .get(r"/items/(?P<id>.+)", Arc::clone(&items), "show")
//!     .build()?;
//!
//! let response = router.dispatch(Request::new(Method::GET, "/items/42"))?;
//! assert_eq!(response.status, 200);
//! # Ok::<(), switchyard::Error>(())
//! ```

mod builder;
mod core;

pub use builder::RouterBuilder;
pub use core::{Route, RouteMatch, Router};
