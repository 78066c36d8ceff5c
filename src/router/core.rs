use http::Method;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::controller::{Action, Context, Controller};
use crate::error::Result;
use crate::render::Renderer;
use crate::request::Request;
use crate::response::Response;
use crate::router::RouterBuilder;

/// One registered route: method, compiled full-path pattern, the controller
/// to instantiate a context for, and the action resolved at build time.
///
/// Immutable once the router is built.
pub struct Route {
    pub(crate) method: Method,
    pub(crate) pattern: Regex,
    pub(crate) pattern_source: String,
    pub(crate) controller: Arc<Controller>,
    pub(crate) action: Action,
}

impl Route {
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The pattern as registered, before anchoring.
    pub fn pattern(&self) -> &str {
        &self.pattern_source
    }

    pub fn controller_name(&self) -> &str {
        self.controller.name()
    }

    pub fn action_name(&self) -> &str {
        self.action.name()
    }
}

/// Result of matching a request against the route table.
pub struct RouteMatch<'r> {
    pub route: &'r Route,
    /// Named capture groups extracted from the path.
    pub path_params: HashMap<String, String>,
}

/// Ordered route table plus the collaborators dispatch needs.
///
/// Read-only after build; share freely across workers.
pub struct Router {
    pub(crate) routes: Vec<Route>,
    pub(crate) renderer: Arc<dyn Renderer>,
    pub(crate) session_cookie: String,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("session_cookie", &self.session_cookie)
            .finish_non_exhaustive()
    }
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Find the first route matching `method` + `path`, in registration
    /// order. The path must already exclude the query string. Named capture
    /// groups become path parameters.
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        for route in &self.routes {
            if route.method != *method {
                continue;
            }
            if let Some(captures) = route.pattern.captures(path) {
                let mut params = HashMap::new();
                for name in route.pattern.capture_names().flatten() {
                    if let Some(m) = captures.name(name) {
                        params.insert(name.to_string(), m.as_str().to_string());
                    }
                }
                debug!(
                    method = %method,
                    path = path,
                    pattern = %route.pattern_source,
                    path_params = ?params,
                    "route matched"
                );
                return Some(RouteMatch {
                    route,
                    path_params: params,
                });
            }
        }
        None
    }

    /// Dispatch a request to the first matching route and run its action to
    /// a finalized response.
    ///
    /// An unmatched request is answered with a 404 without invoking any
    /// handler. Errors out of the action, the double-render guard, or the
    /// render pipeline propagate to the caller untouched.
    pub fn dispatch(&self, request: Request) -> Result<Response> {
        let Some(RouteMatch { route, path_params }) = self.route(&request.method, &request.path)
        else {
            debug!(method = %request.method, path = %request.path, "no route matched");
            return Ok(Response::not_found());
        };

        // Path captures win over same-named query/body parameters.
        let mut params = request.params.clone();
        params.extend(path_params);

        info!(
            method = %request.method,
            path = %request.path,
            controller = route.controller_name(),
            action = route.action_name(),
            "dispatching request"
        );

        let mut ctx = Context::new(
            request,
            params,
            route.controller.name().to_string(),
            Arc::clone(&self.renderer),
            self.session_cookie.clone(),
        );
        ctx.invoke_action(&route.action)?;
        Ok(ctx.into_response())
    }
}
