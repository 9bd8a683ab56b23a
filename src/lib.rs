//! Versioned documentation server library.

pub mod config;
pub mod content;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;

pub use config::DocsConfig;
pub use content::{ContentStore, FsContentStore, MemoryContentStore};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use render::{HtmlRenderer, Renderer};
