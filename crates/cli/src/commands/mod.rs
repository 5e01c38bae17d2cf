//! CLI command implementations.

pub mod auth;
pub mod profile;

use thiserror::Error;

use userhub_client::ClientError;
use userhub_core::{AddressItem, EmailError, date, decode_address};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The profile service call failed.
    #[error("{0}")]
    Client(#[from] ClientError),

    /// The email flag does not look like an email.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// The dob flag could not be parsed in any accepted format.
    #[error("could not parse date: {0:?}")]
    InvalidDate(String),

    /// The command needs a cached session and there is none.
    #[error("not logged in (run `userhub login` first)")]
    NotLoggedIn,
}

/// Raw field flags as typed on the command line.
#[derive(Debug, Default)]
pub struct FieldInput {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub sex: Option<String>,
    pub phones: Vec<String>,
    pub addresses: Vec<String>,
}

impl FieldInput {
    /// Normalize the dob flag to the API format, rejecting garbage
    /// instead of silently dropping the field.
    pub fn api_dob(&self) -> Result<Option<String>, CommandError> {
        match &self.dob {
            None => Ok(None),
            Some(raw) => date::to_api_date(raw)
                .map(Some)
                .ok_or_else(|| CommandError::InvalidDate(raw.clone())),
        }
    }

    /// Parse the address flags into editor rows. Each flag value may be
    /// a delimited string or a legacy trailing-pincode string.
    #[must_use]
    pub fn address_items(&self) -> Vec<AddressItem> {
        self.addresses.iter().map(|s| decode_address(s)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn api_dob_normalizes() {
        let input = FieldInput {
            dob: Some("31-01-2000".to_string()),
            ..Default::default()
        };
        assert_eq!(input.api_dob().unwrap(), Some("2000-01-31".to_string()));
    }

    #[test]
    fn api_dob_rejects_garbage() {
        let input = FieldInput {
            dob: Some("soon".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            input.api_dob(),
            Err(CommandError::InvalidDate(_))
        ));
    }

    #[test]
    fn address_flags_accept_both_formats() {
        let input = FieldInput {
            addresses: vec![
                "12 Park St<|PIN|>560001".to_string(),
                "14 Lake View Road 560034".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(
            input.address_items(),
            vec![
                AddressItem::new("12 Park St", "560001"),
                AddressItem::new("14 Lake View Road", "560034"),
            ]
        );
    }
}
