//! Request types for HTTP handlers.

mod accounts;
mod activities;
mod inquiries;
mod progress;
mod record_ids;
mod users;
mod validations;

pub use accounts::*;
pub use activities::*;
pub use inquiries::*;
pub use progress::*;
pub use record_ids::*;
pub use users::*;
pub use validations::*;
