//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the docs server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the docs server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct DocsConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Site behaviour: versions, start page, debug mode.
    pub site: SiteConfig,

    /// Where documentation content is read from.
    pub content: ContentConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Site configuration. Published to every rendered template.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Product name used in page titles.
    pub name: String,

    /// Redirect target for `/`.
    pub start_page: String,

    /// Version used for unversioned URLs and the 404 page.
    pub default_version: String,

    /// Debug mode: advertises the `local` version and disables fallback handling.
    pub debug: bool,

    /// Menu resource used for navigation and the JSON tree.
    pub menu_resource: String,

    /// First path segments that are never redirected or given a 404 page.
    pub internal_prefixes: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Bolt".to_string(),
            start_page: "/3.0/installation".to_string(),
            default_version: "3.0".to_string(),
            debug: false,
            menu_resource: crate::content::DOCS_MENU.to_string(),
            internal_prefixes: vec!["a".to_string(), "_profiler".to_string()],
        }
    }
}

/// Content source configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    /// Root directory of the filesystem content store.
    pub root: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "content".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DocsConfig = toml::from_str(
            r#"
            [site]
            default_version = "4.0"
            debug = true
            "#,
        )
        .unwrap();

        assert_eq!(config.site.default_version, "4.0");
        assert!(config.site.debug);
        assert_eq!(config.site.start_page, "/3.0/installation");
        assert_eq!(config.site.internal_prefixes, vec!["a", "_profiler"]);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
