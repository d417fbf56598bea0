//! Application state and dependency injection.

mod config;
mod reference;
mod security;
mod state;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::reference::{
    AssignmentError, BulkReferenceAssigner, CandidateGenerator, DEFAULT_MAX_ATTEMPTS,
    RandomCandidateGenerator, ReferenceRequest,
};
pub use crate::service::security::PasswordHasher;
pub use crate::service::state::ServiceState;
pub use crate::{Error, Result};
