//! Quote records and their storage layout.
//!
//! A quote lives in the record store as a field map under `quotes:{id}`
//! holding `user_id` and `quote`. The numeric identifier appears only in the
//! record key, never inside the record; listings recover it by parsing the
//! key back out of the `quotes` index.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Index holding every quote record key.
pub const QUOTES_INDEX: &str = "quotes";

/// Counter allocating quote identifiers.
pub const QUOTE_ID_COUNTER: &str = "quote_id";

pub(crate) const FIELD_USER_ID: &str = "user_id";
pub(crate) const FIELD_TEXT: &str = "quote";

const KEY_PREFIX: &str = "quotes:";

/// Build the record key for a quote identifier.
#[must_use]
pub fn quote_key(id: QuoteId) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// Numeric identifier allocated to a quote at creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct QuoteId(u64);

impl QuoteId {
    /// Wrap a raw identifier.
    #[must_use]
    #[rustfmt::skip]
    pub const fn new(raw: u64) -> Self { Self(raw) }

    /// The raw numeric value.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> u64 { self.0 }

    /// Recover the identifier from a full record key.
    ///
    /// Returns `None` for keys outside the quote namespace or with a
    /// non-numeric remainder.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        key.strip_prefix(KEY_PREFIX)?.parse().ok().map(Self)
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored quote with its derived identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    /// Identifier parsed from the record key.
    #[schema(example = 1)]
    id: QuoteId,
    /// Identifier of the user the quote belongs to.
    #[schema(example = "1")]
    user_id: String,
    /// Quote text.
    #[serde(rename = "quote")]
    #[schema(example = "Le bonheur est parfois caché dans l'inconnu.")]
    text: String,
}

impl Quote {
    /// Assemble a quote from its parts.
    #[must_use]
    pub fn new(id: QuoteId, user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            text: text.into(),
        }
    }

    /// Decode a quote from its stored field map and the identifier carried by
    /// the record key.
    pub fn from_record(
        id: QuoteId,
        fields: &BTreeMap<String, String>,
    ) -> Result<Self, QuoteRecordError> {
        let field = |name: &'static str| {
            fields
                .get(name)
                .cloned()
                .ok_or(QuoteRecordError::MissingField(name))
        };
        Ok(Self {
            id,
            user_id: field(FIELD_USER_ID)?,
            text: field(FIELD_TEXT)?,
        })
    }

    /// Identifier parsed from the record key.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> QuoteId { self.id }

    /// Owning user's identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn user_id(&self) -> &str { &self.user_id }

    /// Quote text.
    #[must_use]
    #[rustfmt::skip]
    pub fn text(&self) -> &str { &self.text }
}

/// Raised when a stored field map cannot be decoded into a [`Quote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuoteRecordError {
    /// A required field is absent from the stored map.
    #[error("quote record is missing the `{0}` field")]
    MissingField(&'static str),
}

/// Validated payload for creating a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDraft {
    user_id: String,
    text: String,
}

impl QuoteDraft {
    /// Validate creation input.
    ///
    /// Both fields must be non-empty. Whitespace is preserved as given, so a
    /// blank-but-nonempty value passes; comparison and search downstream are
    /// exact about what was stored.
    pub fn new(
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, QuoteValidationError> {
        let user_id = user_id.into();
        let text = text.into();
        if user_id.is_empty() {
            return Err(QuoteValidationError::MissingUserId);
        }
        if text.is_empty() {
            return Err(QuoteValidationError::MissingText);
        }
        Ok(Self { user_id, text })
    }

    /// Owning user's identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn user_id(&self) -> &str { &self.user_id }

    /// Quote text.
    #[must_use]
    #[rustfmt::skip]
    pub fn text(&self) -> &str { &self.text }

    /// Field map written for a new record.
    #[must_use]
    pub fn record_fields(&self) -> [(&str, &str); 2] {
        [
            (FIELD_USER_ID, self.user_id.as_str()),
            (FIELD_TEXT, self.text.as_str()),
        ]
    }
}

/// Raised when quote creation input is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuoteValidationError {
    /// The owning user's identifier was absent or empty.
    #[error("user_id is required")]
    MissingUserId,
    /// The quote text was absent or empty.
    #[error("quote is required")]
    MissingText,
}
