//! User records and their storage layout.
//!
//! Users are provisioned from seed data rather than an API. The store keeps
//! each one as a field map under `users:{id}` with the identifier repeated
//! inside the record, and the `users` index holds the full record keys.
//!
//! Passwords are stored and compared in clear text; no hashing happens
//! anywhere in this service, and the directory listing exposes the stored
//! value. That is a known hardening gap carried over from the data this
//! service inherits, not an invitation to add more uses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Index holding every user record key.
pub const USERS_INDEX: &str = "users";

pub(crate) const FIELD_ID: &str = "id";
pub(crate) const FIELD_NAME: &str = "name";
pub(crate) const FIELD_PASSWORD: &str = "password";

/// Build the record key for a user identifier.
#[must_use]
pub fn user_key(id: &str) -> String {
    format!("users:{id}")
}

/// A provisioned user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Stable identifier, also part of the record key.
    #[schema(example = "1")]
    id: String,
    /// Login name, matched exactly at authentication.
    #[schema(example = "admin")]
    name: String,
    /// Stored password; clear text, see the module notes.
    #[schema(example = "admin123")]
    password: String,
}

impl User {
    /// Assemble a user from its parts.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            password: password.into(),
        }
    }

    /// Decode a user from its stored field map.
    pub fn from_record(fields: &BTreeMap<String, String>) -> Result<Self, UserRecordError> {
        let field = |name: &'static str| {
            fields
                .get(name)
                .cloned()
                .ok_or(UserRecordError::MissingField(name))
        };
        Ok(Self {
            id: field(FIELD_ID)?,
            name: field(FIELD_NAME)?,
            password: field(FIELD_PASSWORD)?,
        })
    }

    /// Stable identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> &str { &self.id }

    /// Login name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// Stored clear-text password.
    #[must_use]
    #[rustfmt::skip]
    pub fn password(&self) -> &str { &self.password }

    /// Field map written when provisioning the user.
    #[must_use]
    pub fn record_fields(&self) -> [(&str, &str); 3] {
        [
            (FIELD_ID, self.id.as_str()),
            (FIELD_NAME, self.name.as_str()),
            (FIELD_PASSWORD, self.password.as_str()),
        ]
    }
}

/// Raised when a stored field map cannot be decoded into a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserRecordError {
    /// A required field is absent from the stored map.
    #[error("user record is missing the `{0}` field")]
    MissingField(&'static str),
}
