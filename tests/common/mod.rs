#![allow(dead_code)]

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Once;
use switchyard::{Error, Renderer, Result};

static INIT: Once = Once::new();

/// Install a test tracing subscriber once per test binary. Respects
/// RUST_LOG for ad-hoc debugging.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// In-memory render pipeline: templates are looked up by
/// (controller, template) and returned verbatim as text/html. Anything not
/// registered is a missing template, same as the file-backed renderer.
pub struct MapRenderer {
    templates: HashMap<(String, String), String>,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    pub fn template(mut self, controller: &str, template: &str, body: &str) -> Self {
        self.templates
            .insert((controller.to_string(), template.to_string()), body.to_string());
        self
    }
}

impl Renderer for MapRenderer {
    fn render(
        &self,
        controller: &str,
        template: &str,
        _assigns: &Value,
    ) -> Result<(Vec<u8>, String)> {
        let key = (controller.to_string(), template.to_string());
        match self.templates.get(&key) {
            Some(body) => Ok((body.clone().into_bytes(), "text/html".to_string())),
            None => Err(Error::TemplateMissing {
                path: format!("{controller}/{template}"),
            }),
        }
    }
}
