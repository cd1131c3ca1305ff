//! Actix middleware shared by every route group.

pub mod trace;

pub use trace::Trace;
