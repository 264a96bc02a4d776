//! Skin template rendering.
//!
//! Thin wrapper around a minijinja environment bound to the skin's
//! template directory. Writers hand it a template name and a context
//! value; everything else about the skin is opaque to the core.

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, path_loader};
use std::path::Path;

/// Template engine bound to `<skin>/templates`.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Bind an environment to a template directory.
    ///
    /// Templates are loaded lazily, so a missing directory only fails
    /// once a writer asks for a template. Auto-escaping is off: page
    /// content reaches the templates as already-rendered HTML.
    pub fn from_dir(dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir));
        env.set_auto_escape_callback(|_| AutoEscape::None);

        Self { env }
    }

    /// Render one template with the given context.
    pub fn render(&self, name: &str, context: minijinja::Value) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .with_context(|| format!("Unable to load template: {name}"))?;

        template
            .render(context)
            .with_context(|| format!("Unable to render template: {name}"))
    }
}
