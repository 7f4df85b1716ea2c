use handlebars::{Handlebars, handlebars_helper, no_escape};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TEngineError {
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),
    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),
}

/// Plain-text handlebars engine.
///
/// HTML escaping is disabled: everything rendered here is prompt or
/// document text, never markup. Registers a `truncate` helper that keeps the
/// first N characters of a string.
pub struct TEngine {
    handlebars: Handlebars<'static>,
}

impl Default for TEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TEngine {
    pub fn new() -> Self {
        let mut te = TEngine {
            handlebars: Handlebars::new(),
        };
        handlebars_helper!(truncate: |text: str, max: u64| {
            text.chars().take(max as usize).collect::<String>()
        });
        te.handlebars.register_escape_fn(no_escape);
        te.handlebars.register_helper("truncate", Box::new(truncate));
        te
    }

    pub fn register_template_string(
        &mut self,
        name: &str,
        template: &str,
    ) -> Result<(), TEngineError> {
        self.handlebars.register_template_string(name, template)?;
        Ok(())
    }

    /// Renders a template previously registered under `name`.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, TEngineError> {
        Ok(self.handlebars.render(name, data)?)
    }

    /// Renders an inline template string.
    pub fn render_template<T: Serialize>(
        &self,
        template: &str,
        data: &T,
    ) -> Result<String, TEngineError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_renders_without_escaping() {
        let engine = TEngine::new();
        let data = serde_json::json!({"subject": "Q&A <weekly>"});
        let rendered = engine.render_template("Subject: {{subject}}", &data).unwrap();
        assert_eq!(rendered, "Subject: Q&A <weekly>");
    }

    #[test]
    fn truncate_counts_characters() {
        let engine = TEngine::new();
        let data = serde_json::json!({"body": "héllo wörld"});
        let rendered = engine.render_template("{{truncate body 5}}", &data).unwrap();
        assert_eq!(rendered, "héllo");
    }

    #[test]
    fn registered_templates_render_by_name() {
        let mut engine = TEngine::new();
        engine
            .register_template_string("greeting", "Hello, {{name}}!")
            .unwrap();
        let rendered = engine
            .render("greeting", &serde_json::json!({"name": "inbox"}))
            .unwrap();
        assert_eq!(rendered, "Hello, inbox!");
    }

    #[test]
    fn missing_template_is_an_error() {
        let engine = TEngine::new();
        let result = engine.render("nope", &serde_json::json!({}));
        assert!(matches!(result, Err(TEngineError::RenderError(_))));
    }
}
