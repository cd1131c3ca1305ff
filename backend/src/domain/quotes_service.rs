//! Quote collection operations over the shared record store.
//!
//! Writes follow a fixed order per operation: creation allocates an
//! identifier, writes the record, then indexes it; deletion removes the
//! record before its index entry. Readers can interleave with either
//! sequence, so listings tolerate index entries that do not resolve to a
//! decodable record, and existence checks go to the record rather than the
//! index. A half-created quote is therefore already updatable before it
//! shows up in listings.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::domain::error::Error;
use crate::domain::ports::RecordStore;
use crate::domain::quote::{self, Quote, QuoteDraft, QuoteId};

/// Create, read, update, and delete quotes.
pub struct QuotesService {
    store: Arc<dyn RecordStore>,
}

impl QuotesService {
    /// Service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// List every quote reachable through the index.
    ///
    /// Entries with a malformed key or an undecodable record are skipped and
    /// logged; a concurrent writer mid-creation or mid-deletion must not
    /// fail the whole listing.
    pub async fn list(&self) -> Result<Vec<Quote>, Error> {
        let members = self.store.index_members(quote::QUOTES_INDEX).await?;
        let mut quotes = Vec::with_capacity(members.len());
        for key in &members {
            let Some(id) = QuoteId::from_key(key) else {
                warn!(key = %key, "skipping index entry with malformed key");
                continue;
            };
            let fields = self.store.get_record(key).await?;
            match Quote::from_record(id, &fields) {
                Ok(quote) => quotes.push(quote),
                Err(err) => warn!(key = %key, error = %err, "skipping undecodable quote record"),
            }
        }
        Ok(quotes)
    }

    /// Case-insensitive substring search over quote text.
    ///
    /// An empty keyword is rejected; a whitespace-only one is a legitimate
    /// search for that whitespace.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Quote>, Error> {
        if keyword.is_empty() {
            return Err(Error::invalid_request("keyword is required")
                .with_details(json!({ "field": "keyword", "code": "missing_keyword" })));
        }
        let needle = keyword.to_lowercase();
        let mut quotes = self.list().await?;
        quotes.retain(|quote| quote.text().to_lowercase().contains(&needle));
        Ok(quotes)
    }

    /// Store a new quote and return its identifier.
    ///
    /// Identifier allocation is atomic, so concurrent creations never share
    /// an id; the record write and index insert follow as separate steps.
    pub async fn add(&self, draft: &QuoteDraft) -> Result<QuoteId, Error> {
        let id = QuoteId::new(self.store.allocate_counter(quote::QUOTE_ID_COUNTER).await?);
        let key = quote::quote_key(id);
        self.store.put_record(&key, &draft.record_fields()).await?;
        self.store.index_add(quote::QUOTES_INDEX, &key).await?;
        Ok(id)
    }

    /// Replace the text of an existing quote.
    ///
    /// Existence is judged by the record itself, not the index, so a quote
    /// whose index insert has not landed yet is already updatable.
    pub async fn update_text(&self, id: QuoteId, text: &str) -> Result<(), Error> {
        let key = quote::quote_key(id);
        if !self.store.record_exists(&key).await? {
            return Err(Error::not_found("quote not found"));
        }
        self.store.set_field(&key, quote::FIELD_TEXT, text).await?;
        Ok(())
    }

    /// Remove a quote and then its index entry.
    pub async fn delete(&self, id: QuoteId) -> Result<(), Error> {
        let key = quote::quote_key(id);
        if !self.store.record_exists(&key).await? {
            return Err(Error::not_found("quote not found"));
        }
        self.store.delete_record(&key).await?;
        self.store.index_remove(quote::QUOTES_INDEX, &key).await?;
        Ok(())
    }
}
