//! Template rendering subsystem.
//!
//! # Data Flow
//! ```text
//! handler → ViewModel (named values)
//!         + Globals (site config, versions) from the request context
//!         → Renderer::render(template)
//!         → HTML string
//! ```
//!
//! # Design Decisions
//! - Globals are passed explicitly per call, never stored in the renderer
//! - A template missing one of its required variables is an error, not a blank

pub mod html;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::Version;

pub use html::HtmlRenderer;

/// Templates the dispatcher can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Generic page (also used for the 404 page).
    Index,
    ClassReference,
    Cheatsheet,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Template::Index => "index.html",
            Template::ClassReference => "classreference.html",
            Template::Cheatsheet => "cheatsheet.html",
        }
    }

    /// Variables the template cannot render without.
    pub fn required_variables(&self) -> &'static [&'static str] {
        match self {
            Template::Index => &["title", "source", "menu", "version"],
            Template::ClassReference => &["title", "menu", "version", "classes"],
            Template::Cheatsheet => &["title", "menu", "version", "cheatsheet", "current"],
        }
    }
}

/// Values visible to every template rendered during a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Globals {
    pub config: SiteConfig,
    pub versions: Vec<Version>,
}

/// Named values handed to a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewModel(Map<String, Value>);

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, serializing it to JSON.
    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Result<Self, RenderError> {
        let value = serde_json::to_value(value).map_err(|e| RenderError::Serialize {
            key: key.to_string(),
            source: e,
        })?;
        self.0.insert(key.to_string(), value);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

/// Errors raised while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template `{template}` requires variable `{key}`")]
    MissingVariable { template: &'static str, key: &'static str },

    #[error("variable `{key}` could not be serialized: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Turns a template name and view-model into a document.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        template: Template,
        globals: &Globals,
        vars: &ViewModel,
    ) -> Result<String, RenderError>;
}

/// Fail with `MissingVariable` if `vars` lacks any of the template's required keys.
pub fn check_required(template: Template, vars: &ViewModel) -> Result<(), RenderError> {
    match template
        .required_variables()
        .iter()
        .find(|key| !vars.contains(key))
    {
        Some(&key) => Err(RenderError::MissingVariable {
            template: template.name(),
            key,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_model_builder() {
        let vars = ViewModel::new()
            .with("title", "Hello")
            .unwrap()
            .with("menu", &Vec::<String>::new())
            .unwrap();

        assert_eq!(vars.get_str("title"), Some("Hello"));
        assert_eq!(vars.get("menu"), Some(&Value::Array(vec![])));
        assert!(!vars.contains("source"));
    }

    #[test]
    fn test_check_required() {
        let vars = ViewModel::new().with("title", "x").unwrap();
        let err = check_required(Template::Index, &vars).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingVariable { template: "index.html", key: "source" }
        ));
    }
}
