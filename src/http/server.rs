//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing, timeout, context, fallback)
//! - Bind server to listener
//! - Apply configuration reloads
//!
//! # Layer Order (outermost first)
//! ```text
//! SetRequestId → Trace → PropagateRequestId → Timeout
//!     → handle_errors (fallback + metrics)
//!     → init_context (versions, config snapshot)
//!     → dispatch
//! ```

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::DocsConfig;
use crate::content::{ContentStore, FsContentStore};
use crate::http::context::init_context;
use crate::http::fallback::handle_errors;
use crate::http::handlers::dispatch;
use crate::http::request::MakeRequestUuidV4;
use crate::lifecycle::signals::shutdown_signal;
use crate::render::{HtmlRenderer, Renderer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<DocsConfig>>,
    pub store: Arc<dyn ContentStore>,
    pub renderer: Arc<dyn Renderer>,
}

/// HTTP server for the documentation site.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a server reading content from `config.content.root`.
    pub fn new(config: DocsConfig) -> Self {
        let store = Arc::new(FsContentStore::new(&config.content.root));
        Self::with_store(config, store)
    }

    /// Create a server backed by the given content store.
    pub fn with_store(config: DocsConfig, store: Arc<dyn ContentStore>) -> Self {
        Self::with_parts(config, store, Arc::new(HtmlRenderer::new()))
    }

    /// Create a server from explicit collaborators.
    pub fn with_parts(
        config: DocsConfig,
        store: Arc<dyn ContentStore>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let state = AppState {
            config: Arc::new(ArcSwap::from_pointee(config)),
            store,
            renderer,
        };

        let router = Self::build_router(request_timeout, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(request_timeout: Duration, state: AppState) -> Router {
        Router::new()
            .route("/", get(dispatch))
            .route("/{*path}", get(dispatch))
            .layer(middleware::from_fn_with_state(state.clone(), init_context))
            .layer(middleware::from_fn_with_state(state.clone(), handle_errors))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for driving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<DocsConfig> {
        self.state.config.load_full()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configs received on `config_updates` replace the running config.
    /// Returns after `shutdown` fires (or Ctrl+C) and in-flight requests finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<DocsConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let shared_config = self.state.config.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                let current = shared_config.load();
                if current.content.root != new_config.content.root {
                    tracing::warn!(
                        current = %current.content.root,
                        requested = %new_config.content.root,
                        "content.root changes require a restart; keeping the current store"
                    );
                }
                shared_config.store(Arc::new(new_config));
                tracing::info!("Configuration reloaded");
            }
        });

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
