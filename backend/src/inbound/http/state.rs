//! Shared state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::auth_service::AuthService;
use crate::domain::ports::RecordStore;
use crate::domain::quotes_service::QuotesService;
use crate::domain::token::{TokenSigner, TokenVerifier};
use crate::domain::user_directory::UserDirectory;

/// Domain services bundled behind `web::Data`.
///
/// Every route group shares one record store and one signing secret, no
/// matter how many processes the deployment splits them across.
#[derive(Clone)]
pub struct HttpState {
    /// Login service issuing tokens.
    pub auth: Arc<AuthService>,
    /// Read side of the user collection.
    pub users: Arc<UserDirectory>,
    /// Quote collection operations.
    pub quotes: Arc<QuotesService>,
    /// Verifier for tokens presented on protected routes.
    pub tokens: TokenVerifier,
}

impl HttpState {
    /// Wire every service to the same `store` and signing `secret`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, secret: &str) -> Self {
        Self {
            auth: Arc::new(AuthService::new(
                Arc::clone(&store),
                TokenSigner::new(secret),
            )),
            users: Arc::new(UserDirectory::new(Arc::clone(&store))),
            quotes: Arc::new(QuotesService::new(store)),
            tokens: TokenVerifier::new(secret),
        }
    }
}
