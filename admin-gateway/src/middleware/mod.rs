pub mod auth;
pub mod metrics;

pub use auth::{auth_middleware, Caller};
pub use metrics::metrics_middleware;
