//! Response types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod accounts;
mod activities;
mod errors;
mod inquiries;
mod monitors;
mod progress;
mod users;

pub use accounts::*;
pub use activities::*;
pub use errors::*;
pub use inquiries::*;
pub use monitors::*;
pub use progress::*;
pub use users::*;

/// Success envelope: `{ "success": true, "data": ... }`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "{T}Envelope")]
pub struct Envelope<T> {
    /// Always `true`.
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    #[inline]
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T, U> FromIterator<U> for Envelope<Vec<T>>
where
    T: From<U>,
{
    fn from_iter<I: IntoIterator<Item = U>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(T::from).collect())
    }
}
