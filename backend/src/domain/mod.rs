//! Core domain model: services, ports, and supporting primitives.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod ports;
pub mod quote;
pub mod quotes_service;
pub mod token;
pub mod trace_id;
pub mod user;
pub mod user_directory;

pub use auth::LoginCredentials;
pub use auth_service::AuthService;
pub use error::{Error, ErrorCode};
pub use quote::{Quote, QuoteDraft, QuoteId};
pub use quotes_service::QuotesService;
pub use token::{TokenError, TokenSigner, TokenVerifier};
pub use trace_id::{TRACE_ID_HEADER, TraceId};
pub use user::User;
pub use user_directory::UserDirectory;
