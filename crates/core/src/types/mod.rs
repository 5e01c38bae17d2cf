//! Shared newtype wrappers.

mod email;
mod id;

pub use email::{Email, EmailError};
pub use id::ProfileId;
