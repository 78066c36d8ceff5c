//! Template rendering boundary.
//!
//! The default render path (an action finishing without finalizing its
//! response) needs something that turns a (controller, template) pair into
//! body bytes. [`Renderer`] is that seam; [`DirRenderer`] is the stock
//! implementation, evaluating minijinja templates from a views directory.
//! Test suites substitute their own in-memory implementations.

use minijinja::Environment;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Produces response body bytes and a content type for a controller's
/// template. A missing template is an error, never an empty response.
pub trait Renderer: Send + Sync {
    fn render(&self, controller: &str, template: &str, assigns: &Value)
        -> Result<(Vec<u8>, String)>;
}

/// File-backed renderer: templates live at
/// `<root>/<controller>/<template>.html` and are evaluated with minijinja
/// against the context's assigns.
pub struct DirRenderer {
    root: PathBuf,
}

impl DirRenderer {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl Renderer for DirRenderer {
    fn render(
        &self,
        controller: &str,
        template: &str,
        assigns: &Value,
    ) -> Result<(Vec<u8>, String)> {
        let path = self.root.join(controller).join(format!("{template}.html"));
        if !path.is_file() {
            return Err(Error::TemplateMissing {
                path: path.display().to_string(),
            });
        }
        let source = fs::read_to_string(&path)?;
        let mut env = Environment::new();
        env.add_template("tpl", &source)?;
        let rendered = env.get_template("tpl")?.render(assigns)?;
        Ok((rendered.into_bytes(), "text/html".to_string()))
    }
}
