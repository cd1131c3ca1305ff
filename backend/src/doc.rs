//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every HTTP endpoint and the schemas they exchange.
//! The generated document backs Swagger UI in debug builds and is exported
//! via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::error::{Error, ErrorCode};
use crate::domain::quote::{Quote, QuoteId};
use crate::domain::user::User;
use crate::inbound::http::modification::{
    AddQuoteRequest, AddQuoteResponse, MessageResponse, UpdateQuoteRequest,
};
use crate::inbound::http::users::{LoginRequest, LoginResponse};

/// Enrich the generated document with the bearer token security scheme.
///
/// Tokens travel in the `Authorization` header as issued, without a scheme
/// prefix, so the document models them as a header API key rather than HTTP
/// bearer auth.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Token issued by POST /login, sent verbatim.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Quotes backend API",
        description = "HTTP interface for token-issued access to the shared quote store."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::list_users,
        crate::inbound::http::quotes::list_quotes,
        crate::inbound::http::quotes::search_quotes,
        crate::inbound::http::modification::home,
        crate::inbound::http::modification::add_quote,
        crate::inbound::http::modification::update_quote,
        crate::inbound::http::modification::delete_quote,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Quote,
        QuoteId,
        LoginRequest,
        LoginResponse,
        AddQuoteRequest,
        AddQuoteResponse,
        UpdateQuoteRequest,
        MessageResponse,
    )),
    tags(
        (name = "auth", description = "Login and the protected user listing"),
        (name = "quotes", description = "Quote listing and search"),
        (name = "modification", description = "Quote creation, update, and deletion"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
