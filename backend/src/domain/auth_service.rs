//! Login service exchanging credentials for signed tokens.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::ports::RecordStore;
use crate::domain::token::TokenSigner;
use crate::domain::user::{self, User};

/// Authenticates users against the shared record store.
pub struct AuthService {
    store: Arc<dyn RecordStore>,
    signer: TokenSigner,
}

impl AuthService {
    /// Service over `store`, issuing tokens with `signer`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, signer: TokenSigner) -> Self {
        Self { store, signer }
    }

    /// Exchange `credentials` for a signed token.
    ///
    /// Scans the user index for a record whose name and password both match
    /// exactly; the first match wins. Every miss, including records that no
    /// longer decode, produces the same unauthorized error so callers cannot
    /// probe which part failed.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<String, Error> {
        let members = self.store.index_members(user::USERS_INDEX).await?;
        for key in &members {
            let fields = self.store.get_record(key).await?;
            let user = match User::from_record(&fields) {
                Ok(user) => user,
                Err(err) => {
                    warn!(key = %key, error = %err, "skipping undecodable user record");
                    continue;
                }
            };
            if user.name() == credentials.name() && user.password() == credentials.password() {
                return self.signer.issue(user.id()).map_err(|err| {
                    error!(error = %err, "token signing failed");
                    Error::internal("token signing failed")
                });
            }
        }
        debug!("login rejected: no matching user");
        Err(Error::unauthorized("incorrect name or password"))
    }
}
