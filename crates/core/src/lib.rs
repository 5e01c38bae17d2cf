//! Userhub Core - Shared types and pure helpers.
//!
//! This crate provides common types used across all userhub components:
//! - `client` - REST client for the profile service
//! - `cli` - Command-line frontend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no HTTP, no
//! filesystem access. Everything here is synchronous and deterministic,
//! which keeps it usable from any context.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`address`] - Encode/decode for the address+pincode wire format
//! - [`date`] - Lenient date parsing and canonical formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address;
pub mod date;
pub mod types;

pub use address::{
    ADDRESS_PIN_DELIMITER, AddressItem, decode_address, encode_address, validate_address_items,
};
pub use types::*;
