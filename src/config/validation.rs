//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that redirect targets are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DocsConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::DocsConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("site.start_page must not be empty")]
    EmptyStartPage,

    #[error("site.start_page `{0}` must be an absolute path or URL")]
    RelativeStartPage(String),

    #[error("site.default_version must not be empty")]
    EmptyDefaultVersion,

    #[error("site.default_version `{0}` must be a single path segment")]
    InvalidDefaultVersion(String),

    #[error("site.menu_resource must not be empty")]
    EmptyMenuResource,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("{field} `{value}` is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &DocsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let site = &config.site;

    if site.start_page.is_empty() {
        errors.push(ValidationError::EmptyStartPage);
    } else if !(site.start_page.starts_with('/') || site.start_page.contains("://")) {
        errors.push(ValidationError::RelativeStartPage(site.start_page.clone()));
    }

    if site.default_version.is_empty() {
        errors.push(ValidationError::EmptyDefaultVersion);
    } else if site.default_version.contains('/') {
        errors.push(ValidationError::InvalidDefaultVersion(
            site.default_version.clone(),
        ));
    }

    if site.menu_resource.is_empty() {
        errors.push(ValidationError::EmptyMenuResource);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&DocsConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DocsConfig::default();
        config.site.start_page = "docs".into();
        config.site.default_version = String::new();
        config.timeouts.request_secs = 0;
        config.listener.bind_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::RelativeStartPage("docs".into())));
        assert!(errors.contains(&ValidationError::EmptyDefaultVersion));
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
    }

    #[test]
    fn test_external_start_page_allowed() {
        let mut config = DocsConfig::default();
        config.site.start_page = "https://docs.example.com/3.0/".into();
        assert!(validate_config(&config).is_ok());
    }
}
