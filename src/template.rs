//! Service-registration script rendering.
use regex::{Captures, Regex};
use std::{collections::BTreeMap, fs, path::Path};

use crate::constants::SERVICE_TEMPLATE_ID;
use crate::error::RenderError;

/// Contract for rendering a named template to a file.
pub trait TemplateRenderer: Send + Sync {
    /// Renders the template identified by `template_id` with the given
    /// variables and writes the result to `output_path`.
    fn render(
        &self,
        template_id: &str,
        output_path: &Path,
        vars: &BTreeMap<String, String>,
    ) -> Result<(), RenderError>;
}

/// Renderer over templates embedded in the binary.
///
/// Placeholders have the form `{{ name }}`. Placeholders without a matching
/// variable are left in place rather than erased, so a broken rendering is
/// visible in the output script instead of silently producing empty fields.
#[derive(Debug, Default)]
pub struct EmbeddedRenderer;

impl EmbeddedRenderer {
    /// Creates a renderer over the built-in template set.
    pub fn new() -> Self {
        Self
    }

    fn template_source(template_id: &str) -> Option<&'static str> {
        match template_id {
            SERVICE_TEMPLATE_ID => {
                Some(include_str!("../templates/service.conf.template"))
            }
            _ => None,
        }
    }

    fn substitute(template: &str, vars: &BTreeMap<String, String>) -> String {
        let re = Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap();
        re.replace_all(template, |caps: &Captures| {
            match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
    }
}

impl TemplateRenderer for EmbeddedRenderer {
    fn render(
        &self,
        template_id: &str,
        output_path: &Path,
        vars: &BTreeMap<String, String>,
    ) -> Result<(), RenderError> {
        let template = Self::template_source(template_id)
            .ok_or_else(|| RenderError::TemplateNotFound(template_id.to_string()))?;

        let rendered = Self::substitute(template, vars);
        fs::write(output_path, rendered).map_err(|source| RenderError::WriteError {
            path: output_path.to_path_buf(),
            source,
        })
    }
}
