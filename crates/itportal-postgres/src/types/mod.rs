//! Constraint names and column-level enumerations.

mod constraints;
mod transfer_target;

pub use constraints::{AccountConstraints, ConstraintCategory, ConstraintViolation, UserConstraints};
pub use transfer_target::TransferTarget;
