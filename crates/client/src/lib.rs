//! Userhub client library.
//!
//! Typed wrappers over the external profile service's REST contract,
//! plus the local session cache that stands in for a server-issued
//! token. Persistence, password hashing, and identity all live on the
//! server; this crate only shapes requests, normalizes responses, and
//! remembers who logged in.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod profiles;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use profiles::{LoginResponse, NewProfile, ProfileClient, ProfileRecord, ProfileUpdate};
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionInfo, SessionStore};
