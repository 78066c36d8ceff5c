//! # Switchyard
//!
//! **Switchyard** is a minimal web-request dispatch layer for Rust: a
//! regex-driven HTTP router paired with a controller invocation lifecycle
//! that produces exactly one response per request.
//!
//! ## Overview
//!
//! Routes are (method, regex-with-named-captures) pairs registered in order
//! against a controller action. Dispatch scans the table in registration
//! order and hands the first structural match a fresh per-request controller
//! context carrying the request, the response shell, the merged parameter
//! set, and a lazily materialized session. The transport loop, static-file
//! serving, and exception-to-HTTP translation are collaborators behind
//! narrow seams, not part of this crate.
//!
//! ## Architecture
//!
//! The library is organized into a handful of small modules:
//!
//! - **[`router`]** - route registration, first-match-wins resolution, and
//!   dispatch
//! - **[`controller`]** - named-action controllers and the per-request
//!   context with its exactly-once finalize guard
//! - **[`session`]** - lazy cookie-token session store
//! - **[`render`]** - the template pipeline seam and the stock
//!   minijinja-backed directory renderer
//! - **[`request`]** / **[`response`]** - owned transport-boundary types
//! - **[`error`]** - the crate error taxonomy
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Router
//!     participant Context as Context<br/>(per request)
//!     participant Action
//!     participant Renderer
//!
//!     Transport->>Router: dispatch(Request)
//!     Router->>Router: scan routes in registration order<br/>(method equality + full-path regex)
//!
//!     alt No Route Match
//!         Router-->>Transport: 404 Not Found<br/>(no handler invoked)
//!     end
//!
//!     Router->>Router: merge named captures over<br/>query/body params (capture wins)
//!     Router->>Context: new(request, params)
//!     Router->>Action: invoke resolved action
//!     Action->>Context: redirect / render_content / nothing
//!
//!     alt Action did not finalize
//!         Context->>Renderer: render(controller, action-name template)
//!         Renderer-->>Context: body bytes + content type
//!     end
//!
//!     Context->>Context: store session cookie<br/>(only if touched, at finalize)
//!     Context-->>Router: finalized Response
//!     Router-->>Transport: Response
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use http::Method;
//! use switchyard::{Controller, Request, Router};
//!
//! let items = Arc::new(
//!     Controller::new("items")
//!         .action("show", |ctx| {
//!             let id = ctx.param("id").unwrap_or_default().to_string();
//!             ctx.render_content(format!("item {id}"), "text/plain")
//!         })
//!         .action("create", |ctx| ctx.redirect("/items")),
//! );
//!
//! let router = Router::builder()
//!     .get(r"/items/(?P<id>.+)", Arc::clone(&items), "show")
//!     .post(r"/items", Arc::clone(&items), "create")
//!     .build()?;
//!
//! let response = router.dispatch(Request::new(Method::GET, "/items/42"))?;
//! assert_eq!(response.status, 200);
//! # Ok::<(), switchyard::Error>(())
//! ```
//!
//! ## Lifecycle Guarantees
//!
//! - **First-match-wins**: overlapping routes are legal; the earlier
//!   registration shadows later ones. Order routes deliberately.
//! - **Exactly one response**: a context finalizes through `redirect` or
//!   `render_content` exactly once; a second attempt fails with
//!   [`Error::DoubleRender`]. An action that finalizes nothing gets the
//!   default template named after the action.
//! - **Session timing**: the session cookie is written at finalize time,
//!   and only when the session was touched during the cycle.
//! - **Fail-fast routes**: malformed patterns, unknown actions, and
//!   unsupported methods are build-time errors; the router refuses to
//!   exist with a broken table.
//!
//! ## Concurrency
//!
//! The route table is immutable after build and safe to share read-only
//! across workers. Each `Context` (and its session) is exclusively owned by
//! the request that created it and is never reused.

pub mod controller;
pub mod error;
pub mod render;
pub mod request;
pub mod response;
pub mod router;
pub mod session;

pub use controller::{Action, ActionFn, Context, Controller};
pub use error::{Error, Result};
pub use render::{DirRenderer, Renderer};
pub use request::Request;
pub use response::Response;
pub use router::{Route, RouteMatch, Router, RouterBuilder};
pub use session::{Session, DEFAULT_SESSION_COOKIE};
