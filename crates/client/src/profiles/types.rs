//! Request and response types for the profile service.
//!
//! The service is consumed, not owned: response structs tolerate the
//! shapes it is known to produce (flat string lists or `{phone}` /
//! `{address}` record lists, dates with or without a time component)
//! and normalize them into one [`ProfileRecord`].

use serde::{Deserialize, Serialize};

use userhub_core::{
    AddressItem, ProfileId, decode_address, encode_address, validate_address_items,
};

use crate::error::ClientError;

/// Wire dates are truncated to `yyyy-MM-dd` on read regardless of
/// server-supplied precision.
const API_DATE_LEN: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Input for registering a profile. Only email and password are
/// required; everything else is optional.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    /// Login email.
    pub email: String,
    /// Login password (hashed server-side; never stored here).
    pub password: String,
    /// Display name.
    pub name: Option<String>,
    /// Date of birth as `yyyy-MM-dd`.
    pub dob: Option<String>,
    /// Free-form sex field, passed through verbatim.
    pub sex: Option<String>,
    /// Phone numbers; empty entries are dropped before sending.
    pub phones: Vec<String>,
    /// Address rows; encoded to wire strings before sending.
    pub addresses: Vec<AddressItem>,
}

/// Input for updating a profile.
///
/// The service requires password re-entry to authorize any update, even
/// when only unrelated fields change, and the (frozen) email must be
/// sent back too.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// Login email (frozen, but the service expects it).
    pub email: String,
    /// Current password; mandatory on every update.
    pub password: String,
    /// Display name.
    pub name: Option<String>,
    /// Date of birth as `yyyy-MM-dd`.
    pub dob: Option<String>,
    /// Free-form sex field.
    pub sex: Option<String>,
    /// Phone numbers; empty entries are dropped before sending.
    pub phones: Vec<String>,
    /// Address rows; encoded to wire strings before sending.
    pub addresses: Vec<AddressItem>,
}

/// JSON body shared by the register and update endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct ProfilePayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
}

/// Validate fields and build the shared wire body.
///
/// Address rows are checked (non-empty address requires a 6-digit
/// pincode), then encoded; rows that encode to `""` and blank phones
/// are dropped rather than sent.
pub(crate) fn build_payload<'a>(
    email: &'a str,
    password: &'a str,
    name: Option<&'a str>,
    dob: Option<&'a str>,
    sex: Option<&'a str>,
    phones: &'a [String],
    addresses: &[AddressItem],
) -> Result<ProfilePayload<'a>, ClientError> {
    if email.trim().is_empty() {
        return Err(ClientError::Validation("email is required".to_string()));
    }
    if password.trim().is_empty() {
        return Err(ClientError::Validation("password is required".to_string()));
    }
    if !validate_address_items(addresses) {
        return Err(ClientError::Validation(
            "every address needs a 6-digit pincode".to_string(),
        ));
    }

    Ok(ProfilePayload {
        email: email.trim(),
        password,
        name: name.map(str::trim).filter(|s| !s.is_empty()),
        dob: dob.filter(|s| !s.is_empty()),
        sex: sex.map(str::trim).filter(|s| !s.is_empty()),
        phones: phones
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect(),
        addresses: addresses
            .iter()
            .map(encode_address)
            .filter(|s| !s.is_empty())
            .collect(),
    })
}

/// Login request body.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Verify-password request body.
#[derive(Debug, Serialize)]
pub(crate) struct VerifyPasswordRequest<'a> {
    pub password: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

/// Login endpoint response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResponse {
    /// Whether the credentials were accepted.
    pub success: bool,
    /// Server-supplied message, set on failure and sometimes on success.
    pub message: String,
    /// The profile's id; present on success.
    pub profile_id: Option<i64>,
    /// The profile's email; present on success.
    pub email: Option<String>,
    /// The profile's display name, when one is set.
    pub name: Option<String>,
}

/// Verify-password endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyPasswordResponse {
    pub matches: bool,
}

/// A phone or address list entry in either tolerated shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PhoneEntry {
    Flat(String),
    Record { phone: String },
}

impl PhoneEntry {
    fn into_string(self) -> String {
        match self {
            Self::Flat(s) => s,
            Self::Record { phone } => phone,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AddressEntry {
    Flat(String),
    Record { address: String },
}

impl AddressEntry {
    fn into_string(self) -> String {
        match self {
            Self::Flat(s) => s,
            Self::Record { address } => address,
        }
    }
}

/// The profile response exactly as the service sends it. The service
/// has shipped two list layouts over time; both are accepted. A
/// `password` field, if ever present, is simply not captured.
#[derive(Debug, Deserialize)]
pub(crate) struct RawProfile {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    dob: Option<String>,
    #[serde(default)]
    age: Option<i64>,
    #[serde(default)]
    sex: Option<String>,
    #[serde(default)]
    phones: Option<Vec<PhoneEntry>>,
    #[serde(default)]
    profile_phones: Option<Vec<PhoneEntry>>,
    #[serde(default)]
    addresses: Option<Vec<AddressEntry>>,
    #[serde(default)]
    profile_addresses: Option<Vec<AddressEntry>>,
}

impl RawProfile {
    /// Collapse the tolerated wire shapes into a [`ProfileRecord`].
    pub(crate) fn normalize(self) -> ProfileRecord {
        ProfileRecord {
            id: ProfileId::new(self.id),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            dob: self
                .dob
                .map(|d| d.chars().take(API_DATE_LEN).collect())
                .unwrap_or_default(),
            age: self.age.unwrap_or_default(),
            sex: self.sex.unwrap_or_default(),
            phones: self
                .phones
                .or(self.profile_phones)
                .unwrap_or_default()
                .into_iter()
                .map(PhoneEntry::into_string)
                .collect(),
            addresses: self
                .addresses
                .or(self.profile_addresses)
                .unwrap_or_default()
                .into_iter()
                .map(AddressEntry::into_string)
                .collect(),
        }
    }
}

/// A normalized profile as consumed by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    /// Numeric id on the service.
    pub id: ProfileId,
    /// Display name (`""` when unset).
    pub name: String,
    /// Login email.
    pub email: String,
    /// Date of birth as `yyyy-MM-dd` (`""` when unset).
    pub dob: String,
    /// Server-computed age in years.
    pub age: i64,
    /// Free-form sex field.
    pub sex: String,
    /// Phone numbers.
    pub phones: Vec<String>,
    /// Encoded address strings as stored by the service.
    pub addresses: Vec<String>,
}

impl ProfileRecord {
    /// Decode the stored address strings into editable rows.
    #[must_use]
    pub fn address_items(&self) -> Vec<AddressItem> {
        self.addresses.iter().map(|s| decode_address(s)).collect()
    }
}
