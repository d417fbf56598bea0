//! Reference-number assignment for taskflow accounts.

mod assigner;
mod generator;

pub use assigner::{
    AssignmentError, BulkReferenceAssigner, DEFAULT_MAX_ATTEMPTS, ReferenceRequest,
};
pub use generator::{CandidateGenerator, RandomCandidateGenerator};
