//! Diesel models for every table in the portal schema.

mod account;
mod activity;
mod inquiry;
mod progress;
mod user;

pub use account::{Account, AccountFilter};
pub use activity::{Activity, UpdateActivity};
pub use inquiry::{Inquiry, UpdateInquiry};
pub use progress::Progress;
pub use user::{NewUser, SALES_DEPARTMENT, User};
