//! Node middleware for the policy graph.
//!
//! Re-exports [`LoggingMiddleware`] and [`WithNodeLogging`].

mod logging;
mod with_node_logging;

// Re-export for public API, even if not directly used internally.
#[allow(unused_imports)]
pub use logging::LoggingMiddleware;
pub use with_node_logging::WithNodeLogging;
