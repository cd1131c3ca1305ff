//! Outbound adapters implementing domain ports against external
//! infrastructure.

pub mod store;
