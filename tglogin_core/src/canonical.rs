//! Data-check string
//!
//! <https://core.telegram.org/widgets/login#checking-authorization>
use std::fmt;

use crate::payload::IdentityPayload;

/// Fields of login data, as declared by the login widget
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    AuthDate,
    FirstName,
    LastName,
    PhotoUrl,
    Username,
    TelegramId,
    Hash,
}

impl LoginField {
    pub const ALL: [Self; 7] = [
        Self::AuthDate,
        Self::FirstName,
        Self::LastName,
        Self::PhotoUrl,
        Self::Username,
        Self::TelegramId,
        Self::Hash,
    ];

    /// Key used by the login widget
    pub fn key(&self) -> &'static str {
        match self {
            Self::AuthDate => "auth_date",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::PhotoUrl => "photo_url",
            Self::Username => "username",
            Self::TelegramId => "id",
            Self::Hash => "hash",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            Self::FirstName | Self::LastName | Self::PhotoUrl | Self::Username,
        )
    }

    /// Returns false for the signature itself
    pub fn is_signed(&self) -> bool {
        *self != Self::Hash
    }
}

#[derive(Debug, PartialEq)]
pub struct CanonicalEntry {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for CanonicalEntry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}={}", self.key, self.value)
    }
}

/// Returns signed fields that are present in login data,
/// sorted by key
pub fn canonical_entries(payload: &IdentityPayload) -> Vec<CanonicalEntry> {
    let mut entries: Vec<_> = LoginField::ALL.iter()
        .filter(|field| field.is_signed())
        .filter_map(|field| {
            // Absent fields are omitted, not rendered as "null"
            payload.field_value(*field).map(|value| CanonicalEntry {
                key: field.key(),
                value,
            })
        })
        .collect();
    entries.sort_by_key(|entry| entry.key);
    entries
}

/// Builds data-check string
pub fn canonicalize(payload: &IdentityPayload) -> String {
    canonical_entries(payload)
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
