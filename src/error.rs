//! Crate-wide error taxonomy.
//!
//! Build-time failures (`RoutePattern`, `UnknownAction`, `UnsupportedMethod`)
//! prevent a [`Router`](crate::router::Router) from being constructed at all.
//! Request-time failures propagate out of `dispatch` so an outer
//! exception-translation layer can convert them into 500-class responses;
//! nothing here is silently swallowed. A request with no matching route is
//! not an error — dispatch answers it with a plain 404.

use thiserror::Error;

/// Errors produced by route construction and request dispatch.
#[derive(Debug, Error)]
pub enum Error {
    /// A finalize operation (`redirect` or `render_content`) was called on a
    /// context whose response was already committed. Fatal to the request.
    #[error("double render: response already finalized")]
    DoubleRender,

    /// The renderer could not find a template file for the requested
    /// controller/template pair.
    #[error("template not found: {path}")]
    TemplateMissing { path: String },

    /// A route pattern failed to compile. Raised by `RouterBuilder::build`,
    /// never at dispatch time.
    #[error("invalid route pattern `{pattern}`")]
    RoutePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A route named an action the target controller never registered.
    #[error("controller `{controller}` has no action `{action}`")]
    UnknownAction { controller: String, action: String },

    /// A route used a method outside the supported set
    /// (GET, POST, PUT, PATCH, DELETE).
    #[error("unsupported route method {0}")]
    UnsupportedMethod(http::Method),

    /// Template evaluation failed after the source was located.
    #[error("template render failed")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An application action failed. Passed through untouched.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
