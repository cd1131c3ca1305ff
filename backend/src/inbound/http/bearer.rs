//! Extraction of the raw authorization token from request headers.
//!
//! Tokens travel in the `Authorization` header as the bare signed string;
//! this API's contract has no `Bearer` prefix. Extraction never fails:
//! verification is a separate step so handlers decide when the credential
//! check runs and every rejection funnels through the same error mapping.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};

/// Raw token captured from the `Authorization` header, if present.
#[derive(Debug, Clone)]
pub struct BearerToken(Option<String>);

impl BearerToken {
    /// The presented token, if any.
    ///
    /// Header values that are not valid UTF-8 are treated as absent.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }

    fn from_headers(req: &HttpRequest) -> Self {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        Self(token)
    }
}

impl FromRequest for BearerToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_headers(req)))
    }
}
