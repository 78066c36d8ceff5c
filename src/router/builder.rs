use http::Method;
use regex::Regex;
use std::sync::Arc;

use crate::controller::{Action, Controller};
use crate::error::{Error, Result};
use crate::render::{DirRenderer, Renderer};
use crate::router::core::{Route, Router};
use crate::session::DEFAULT_SESSION_COOKIE;

struct RouteDef {
    method: Method,
    pattern: String,
    controller: Arc<Controller>,
    action: String,
}

/// Declarative route-table builder.
///
/// Registration order is preserved and load-bearing: dispatch uses pure
/// first-match-wins, so callers order overlapping routes deliberately.
/// All validation happens in [`RouterBuilder::build`] — a malformed pattern,
/// an unknown action, or a method outside the supported set refuses to
/// produce a router.
pub struct RouterBuilder {
    routes: Vec<RouteDef>,
    renderer: Option<Arc<dyn Renderer>>,
    session_cookie: String,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            renderer: None,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    /// Append a route. `pattern` is a regex matched against the full path
    /// (query string excluded); named capture groups become path
    /// parameters. `action` must name an action registered on `controller`.
    pub fn route(
        mut self,
        method: Method,
        pattern: &str,
        controller: Arc<Controller>,
        action: &str,
    ) -> Self {
        self.routes.push(RouteDef {
            method,
            pattern: pattern.to_string(),
            controller,
            action: action.to_string(),
        });
        self
    }

    pub fn get(self, pattern: &str, controller: Arc<Controller>, action: &str) -> Self {
        self.route(Method::GET, pattern, controller, action)
    }

    pub fn post(self, pattern: &str, controller: Arc<Controller>, action: &str) -> Self {
        self.route(Method::POST, pattern, controller, action)
    }

    pub fn put(self, pattern: &str, controller: Arc<Controller>, action: &str) -> Self {
        self.route(Method::PUT, pattern, controller, action)
    }

    pub fn patch(self, pattern: &str, controller: Arc<Controller>, action: &str) -> Self {
        self.route(Method::PATCH, pattern, controller, action)
    }

    pub fn delete(self, pattern: &str, controller: Arc<Controller>, action: &str) -> Self {
        self.route(Method::DELETE, pattern, controller, action)
    }

    /// Substitute the render pipeline used for default renders. Defaults to
    /// a [`DirRenderer`] rooted at `views/`.
    pub fn renderer<R: Renderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Override the session cookie name.
    pub fn session_cookie(mut self, name: &str) -> Self {
        self.session_cookie = name.to_string();
        self
    }

    /// Compile patterns, resolve actions, and freeze the route table.
    ///
    /// Patterns are anchored to match the whole path. The first invalid
    /// registration aborts the build; a router never exists with a broken
    /// route in it.
    pub fn build(self) -> Result<Router> {
        let supported = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ];

        let mut routes = Vec::with_capacity(self.routes.len());
        for def in self.routes {
            if !supported.contains(&def.method) {
                return Err(Error::UnsupportedMethod(def.method));
            }
            let anchored = format!("^(?:{})$", def.pattern);
            let pattern = Regex::new(&anchored).map_err(|source| Error::RoutePattern {
                pattern: def.pattern.clone(),
                source,
            })?;
            let func = def
                .controller
                .resolve(&def.action)
                .ok_or_else(|| Error::UnknownAction {
                    controller: def.controller.name().to_string(),
                    action: def.action.clone(),
                })?;
            routes.push(Route {
                method: def.method,
                pattern,
                pattern_source: def.pattern,
                controller: def.controller,
                action: Action {
                    name: def.action,
                    func,
                },
            });
        }

        Ok(Router {
            routes,
            renderer: self
                .renderer
                .unwrap_or_else(|| Arc::new(DirRenderer::new("views"))),
            session_cookie: self.session_cookie,
        })
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
