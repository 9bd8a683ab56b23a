//! Per-request context initialization.
//!
//! Runs before every handler: fetches the versions list, adds `local` in
//! debug mode, and stores a `RequestContext` in the request extensions.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore, Version, LOCAL_VERSION};
use crate::http::error::AppError;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::render::Globals;

/// State created at request start and dropped at request end.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Path and query of the request as received.
    pub uri: String,

    /// Site config snapshot and advertised versions.
    pub globals: Globals,
}

impl RequestContext {
    pub fn site(&self) -> &SiteConfig {
        &self.globals.config
    }
}

/// Versions to advertise: the store's list, plus `local` in debug mode.
pub fn advertised_versions(
    store: &dyn ContentStore,
    debug: bool,
) -> Result<Vec<Version>, ContentError> {
    let mut versions = store.versions()?;
    if debug && !versions.iter().any(|v| v.key == LOCAL_VERSION) {
        versions.push(Version::local());
    }
    Ok(versions)
}

/// Build the context for one request.
pub fn build_context(
    store: &dyn ContentStore,
    site: &SiteConfig,
    uri: &str,
) -> Result<RequestContext, ContentError> {
    let versions = advertised_versions(store, site.debug)?;
    Ok(RequestContext {
        uri: uri.to_string(),
        globals: Globals {
            config: site.clone(),
            versions,
        },
    })
}

/// Middleware that attaches a `RequestContext` before dispatch.
pub async fn init_context(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let config = state.config.load_full();
    let uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    match build_context(state.store.as_ref(), &config.site, &uri) {
        Ok(context) => {
            tracing::trace!(
                request_id = %request_id(request.headers()),
                versions = context.globals.versions.len(),
                "Request context initialized"
            );
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(e) => AppError::Content(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryContentStore;

    fn store() -> MemoryContentStore {
        MemoryContentStore::new()
            .with_version("3.0", "3.0")
            .with_version("2.2", "2.2")
    }

    #[test]
    fn test_debug_adds_local_version() {
        let versions = advertised_versions(&store(), true).unwrap();
        assert_eq!(versions.len(), 3);
        assert_eq!(versions[2], Version::new("local", "local"));

        let versions = advertised_versions(&store(), false).unwrap();
        assert_eq!(versions.len(), 2);
        assert!(versions.iter().all(|v| v.key != "local"));
    }

    #[test]
    fn test_local_is_not_advertised_twice() {
        let store = store().with_version("local", "local");
        let versions = advertised_versions(&store, true).unwrap();
        assert_eq!(versions.len(), 3);
        assert_eq!(versions.iter().filter(|v| v.key == "local").count(), 1);
    }

    #[test]
    fn test_build_context_publishes_config() {
        let mut site = SiteConfig::default();
        site.name = "Acme".into();

        let ctx = build_context(&store(), &site, "/3.0/intro?x=1").unwrap();
        assert_eq!(ctx.uri, "/3.0/intro?x=1");
        assert_eq!(ctx.site().name, "Acme");
        assert_eq!(ctx.globals.versions.len(), 2);
    }
}
