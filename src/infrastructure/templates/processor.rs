//! Token substitution over template text

use std::sync::Arc;

use tera::{Context, Tera};

use crate::infrastructure::templates::{TemplateError, TemplateLocator, TokenMap};

const INLINE_TEMPLATE: &str = "<inline>";

/// Turns template lines plus a token map into final text
pub trait TemplateProcessor: Send + Sync {
    fn process(&self, lines: &[String], tokens: &TokenMap) -> Result<String, TemplateError>;
}

/// Tera-based processor; placeholders are written `{{ token }}`
#[derive(Debug, Default, Clone, Copy)]
pub struct TeraTemplateProcessor;

impl TeraTemplateProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateProcessor for TeraTemplateProcessor {
    fn process(&self, lines: &[String], tokens: &TokenMap) -> Result<String, TemplateError> {
        let mut context = Context::new();
        for (key, value) in tokens.iter() {
            context.insert(key, value);
        }

        // generated code is not HTML
        Tera::one_off(&lines.join("\n"), &context, false)
            .map_err(|e| TemplateError::render(INLINE_TEMPLATE, error_chain(&e)))
    }
}

/// Locates a named template and runs it through a processor
#[derive(Clone)]
pub struct TemplateRenderer {
    locator: Arc<dyn TemplateLocator>,
    processor: Arc<dyn TemplateProcessor>,
}

impl TemplateRenderer {
    pub fn new(locator: Arc<dyn TemplateLocator>, processor: Arc<dyn TemplateProcessor>) -> Self {
        Self { locator, processor }
    }

    pub fn render(&self, name: &str, tokens: &TokenMap) -> Result<String, TemplateError> {
        let lines = self.locator.locate(name)?;
        self.processor
            .process(&lines, tokens)
            .map_err(|e| match e {
                TemplateError::Render { message, .. } => TemplateError::render(name, message),
                other => other,
            })
    }
}

fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
