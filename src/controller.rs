//! Controller invocation lifecycle.
//!
//! A [`Controller`] is a stateless registry of named actions, shared across
//! requests behind an `Arc`. The per-request state lives in a [`Context`],
//! created fresh by the router for each matched request and discarded once
//! its response is returned.
//!
//! The lifecycle is a two-state machine: a context starts idle and moves to
//! finalized through exactly one of [`Context::redirect`] or
//! [`Context::render_content`]. A second finalize attempt is a programmer
//! error and fails with [`Error::DoubleRender`]. If an action returns
//! without finalizing, [`Context::invoke_action`] renders the default
//! template named after the action, so no request goes unanswered.
//!
//! Session persistence is tied to finalization: the session cookie is
//! written at the moment the response is committed, and only when the
//! session was actually touched during the cycle.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::render::Renderer;
use crate::request::Request;
use crate::response::Response;
use crate::session::Session;

/// Signature of a controller action: mutate the per-request context,
/// optionally finalize the response, propagate application errors.
pub type ActionFn = Arc<dyn Fn(&mut Context) -> Result<()> + Send + Sync>;

/// An action resolved at route-registration time: its name (which doubles
/// as the default template name) plus the function to run.
#[derive(Clone)]
pub struct Action {
    pub(crate) name: String,
    pub(crate) func: ActionFn,
}

impl Action {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named set of actions. Stateless and reusable across requests; routes
/// hold it behind an `Arc` and resolve their action when the router is
/// built, not when a request arrives.
pub struct Controller {
    name: String,
    actions: HashMap<String, ActionFn>,
}

impl Controller {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: HashMap::new(),
        }
    }

    /// Register an action under `name`. The name is also the template
    /// identifier used by the default render.
    pub fn action<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&mut Context) -> Result<()> + Send + Sync + 'static,
    {
        self.actions.insert(name.to_string(), Arc::new(func));
        self
    }

    /// Controller name, used as the template directory for its views.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn resolve(&self, action: &str) -> Option<ActionFn> {
        self.actions.get(action).cloned()
    }
}

/// Per-request controller state: request, in-progress response, merged
/// parameters, template assigns, and the lazily materialized session.
///
/// Exclusively owned by the request that created it; never reused.
pub struct Context {
    request: Request,
    response: Response,
    params: HashMap<String, String>,
    assigns: Map<String, Value>,
    session: Option<Session>,
    finalized: bool,
    controller: String,
    renderer: Arc<dyn Renderer>,
    session_cookie: String,
}

impl Context {
    pub(crate) fn new(
        request: Request,
        params: HashMap<String, String>,
        controller: String,
        renderer: Arc<dyn Renderer>,
        session_cookie: String,
    ) -> Self {
        Self {
            request,
            response: Response::new(),
            params,
            assigns: Map::new(),
            session: None,
            finalized: false,
            controller,
            renderer,
            session_cookie,
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Merged parameters: request query/body params with path captures laid
    /// over them (captures win on key collision).
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Convenience lookup into [`Context::params`].
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Whether the response has been committed.
    pub fn finalized(&self) -> bool {
        self.finalized
    }

    /// Stage a value for the template. Assigns are visible to the renderer
    /// under the given key.
    pub fn assign(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.assigns.insert(key.into(), value);
        Ok(())
    }

    /// Guarded lazy accessor for the session. First access recovers state
    /// from the request's session cookie (or starts empty); a request that
    /// never calls this emits no session cookie at all.
    pub fn session(&mut self) -> &mut Session {
        self.session
            .get_or_insert_with(|| Session::from_request(&self.request, &self.session_cookie))
    }

    /// Finalize with a 302 redirect to `url`.
    ///
    /// Fails with [`Error::DoubleRender`] if the response was already
    /// committed.
    pub fn redirect(&mut self, url: &str) -> Result<()> {
        self.finalize()?;
        self.response.status = 302;
        self.response.set_header("Location", url);
        debug!(location = url, "response finalized via redirect");
        self.persist_session();
        Ok(())
    }

    /// Finalize with a body and content type.
    ///
    /// Fails with [`Error::DoubleRender`] if the response was already
    /// committed.
    pub fn render_content(&mut self, body: impl Into<Vec<u8>>, content_type: &str) -> Result<()> {
        self.finalize()?;
        self.response.set_header("Content-Type", content_type);
        self.response.body = body.into();
        debug!(
            content_type = content_type,
            body_bytes = self.response.body.len(),
            "response finalized via content render"
        );
        self.persist_session();
        Ok(())
    }

    /// Render the named template through the renderer and finalize with the
    /// result. A missing template propagates as an error.
    pub fn render(&mut self, template: &str) -> Result<()> {
        let assigns = Value::Object(self.assigns.clone());
        let (body, content_type) = self.renderer.render(&self.controller, template, &assigns)?;
        self.render_content(body, &content_type)
    }

    /// Run a resolved action, then auto-render its default template if the
    /// action did not finalize the response itself.
    pub fn invoke_action(&mut self, action: &Action) -> Result<()> {
        let func = Arc::clone(&action.func);
        func(self)?;
        if !self.finalized {
            debug!(
                controller = %self.controller,
                template = %action.name,
                "action did not finalize, rendering default template"
            );
            self.render(&action.name)?;
        }
        Ok(())
    }

    /// Consume the context, yielding the committed response.
    pub fn into_response(self) -> Response {
        self.response
    }

    fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Err(Error::DoubleRender);
        }
        self.finalized = true;
        Ok(())
    }

    fn persist_session(&mut self) {
        if let Some(session) = &self.session {
            session.store(&mut self.response, &self.session_cookie);
        }
    }
}
