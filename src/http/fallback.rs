//! Error fallback handling.
//!
//! # Decision Order
//! ```text
//! error response (status >= 400)
//!     → internal prefix or debug mode   → Passthrough
//!     → prefix is not a known version   → Redirect /<default><uri>
//!     → 404                             → NotFoundPage (default version menu)
//!     → anything else                   → Passthrough
//! ```
//!
//! # Design Decisions
//! - Redirect, never rewrite: unversioned URLs become versioned URLs
//! - The 404 page always uses the default version's navigation
//! - Failures while resolving the fallback are logged and the original
//!   response is returned unchanged

use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};

use crate::config::SiteConfig;
use crate::content::{ContentStore, MenuEntry};
use crate::http::error::AppError;
use crate::http::request::request_id;
use crate::http::response::found;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::render::{Globals, Template, ViewModel};
use crate::routing::{version_prefix, Route, VersionResolver};

pub const NOT_FOUND_TITLE: &str = "404 - Page not found";

pub const NOT_FOUND_SOURCE: &str = "<h1>404 - Page not found</h1>\
    This page could not be found. Please click one of the menu items in the \
    sidebar, or use the search form to look for a specific keyword.";

/// What to do with an error response.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    /// Leave the response as the handler produced it.
    Passthrough,

    /// Redirect to this version-prefixed target.
    Redirect(String),

    /// Render the 404 page with these globals and variables.
    NotFoundPage { globals: Globals, vars: ViewModel },
}

impl Fallback {
    fn outcome(&self) -> &'static str {
        match self {
            Fallback::Passthrough => "passthrough",
            Fallback::Redirect(_) => "redirect",
            Fallback::NotFoundPage { .. } => "not_found",
        }
    }
}

/// Decide how to handle an error response for `uri`.
pub fn resolve_fallback(
    store: &dyn ContentStore,
    site: &SiteConfig,
    uri: &Uri,
    status: StatusCode,
) -> Result<Fallback, AppError> {
    let prefix = version_prefix(uri.path());

    if site.debug || site.internal_prefixes.iter().any(|p| p == prefix) {
        return Ok(Fallback::Passthrough);
    }

    let versions = store.versions()?;
    let resolver = VersionResolver::new(site.default_version.as_str(), &versions);

    if !resolver.is_known(prefix) {
        let original = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        return Ok(Fallback::Redirect(format!(
            "/{}{}",
            resolver.default_version(),
            original
        )));
    }

    if status == StatusCode::NOT_FOUND {
        let default_version = resolver.default_version();
        let menu = store.menu(default_version, &site.menu_resource)?;
        let vars = ViewModel::new()
            .with("title", NOT_FOUND_TITLE)?
            .with("source", NOT_FOUND_SOURCE)?
            .with("menu", &menu)?
            .with("submenu", &Vec::<MenuEntry>::new())?
            .with("current", "")?
            .with("version", default_version)?;

        return Ok(Fallback::NotFoundPage {
            globals: Globals {
                config: site.clone(),
                versions,
            },
            vars,
        });
    }

    Ok(Fallback::Passthrough)
}

/// Middleware wrapping dispatch: applies fallback handling and records metrics.
pub async fn handle_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let uri = request.uri().clone();
    let request_id = request_id(request.headers()).to_string();
    let route = Route::parse(uri.path()).map_or("unrouted", |r| r.kind());

    let response = next.run(request).await;
    let status = response.status();

    let response = if status.is_client_error() || status.is_server_error() {
        apply_fallback(&state, &uri, &request_id, response)
    } else {
        response
    };

    metrics::record_request(route, response.status().as_u16(), start);
    response
}

fn apply_fallback(state: &AppState, uri: &Uri, request_id: &str, response: Response) -> Response {
    let config = state.config.load_full();
    let status = response.status();

    let fallback = match resolve_fallback(state.store.as_ref(), &config.site, uri, status) {
        Ok(fallback) => fallback,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                path = %uri.path(),
                error = %e,
                "Fallback resolution failed; check content store configuration"
            );
            return response;
        }
    };

    tracing::debug!(
        request_id = %request_id,
        path = %uri.path(),
        status = %status,
        outcome = fallback.outcome(),
        "Error fallback"
    );
    metrics::record_fallback(fallback.outcome());

    match fallback {
        Fallback::Passthrough => response,
        Fallback::Redirect(target) => match found(&target) {
            Ok(redirect) => redirect,
            Err(e) => {
                tracing::error!(request_id = %request_id, target = %target, error = %e, "Invalid redirect target");
                response
            }
        },
        Fallback::NotFoundPage { globals, vars } => {
            match state.renderer.render(Template::Index, &globals, &vars) {
                Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
                Err(e) => {
                    tracing::error!(request_id = %request_id, error = %e, "Failed to render 404 page");
                    response
                }
            }
        }
    }
}
