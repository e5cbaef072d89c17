//! Plain-text templates for notification emails and the chat system prompt.
//!
//! Templates are compiled into the binary and rendered with minijinja.

use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

pub const GARBAGE_ALERT: &str = "emails/garbage_alert.txt.jinja";
pub const FOOD_ALERT: &str = "emails/food_alert.txt.jinja";
pub const GREENBOT_PROMPT: &str = "prompts/greenbot.txt.jinja";

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    let templates: [(&'static str, &'static str); 3] = [
        (
            GARBAGE_ALERT,
            include_str!("../../templates/emails/garbage_alert.txt.jinja"),
        ),
        (
            FOOD_ALERT,
            include_str!("../../templates/emails/food_alert.txt.jinja"),
        ),
        (
            GREENBOT_PROMPT,
            include_str!("../../templates/prompts/greenbot.txt.jinja"),
        ),
    ];

    for (name, source) in templates {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a built-in template with a serializable context
pub fn render<S: Serialize>(template_name: &str, ctx: S) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
