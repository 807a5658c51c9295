//! HTTP layer: router, middleware, and server lifecycle.

pub mod handlers;
pub mod middleware;
pub mod module;

pub use handlers::AppState;
pub use module::NetworkModule;
