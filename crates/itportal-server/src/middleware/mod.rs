//! Middleware for `axum::Router` and HTTP request processing.
//!
//! ```rust,no_run
//! use axum::Router;
//! use itportal_server::middleware::{
//!     RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery();
//! ```

mod observability;
mod recovery;
mod security;
mod specification;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{
    CorsConfig, FrameOptions, MAX_BODY_SIZE, ReferrerPolicy, RouterSecurityExt,
    SecurityHeadersConfig,
};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
