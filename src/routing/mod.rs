//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → route.rs (parse path into Route)
//!     → Return: Route or None (404)
//!
//! Error responses:
//!     path → route.rs (version_prefix)
//!          → version.rs (is the prefix a known version?)
//! ```
//!
//! # Design Decisions
//! - One parser shared by dispatch and fallback handling
//! - Deterministic: same input always parses to the same route
//! - Version recognition is data-driven (content store), parsing is not

pub mod route;
pub mod version;

pub use route::{version_prefix, Route};
pub use version::VersionResolver;
