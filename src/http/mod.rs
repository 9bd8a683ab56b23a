//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → fallback.rs (wraps everything below; rewrites error responses)
//!     → context.rs (versions + config snapshot for this request)
//!     → handlers.rs (parse Route, fetch content, render)
//!     → response.rs (redirects, JSON tree)
//!     → Send to client
//! ```

pub mod context;
pub mod error;
pub mod fallback;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use context::RequestContext;
pub use error::AppError;
pub use fallback::{resolve_fallback, Fallback};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
