//! Quote creation, update, and deletion endpoints.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::error::Error;
use crate::domain::quote::{QuoteDraft, QuoteId, QuoteValidationError};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Confirmation payload shared by the write endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Body accepted by [`add_quote`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddQuoteRequest {
    /// Identifier of the user the quote belongs to.
    #[schema(example = "1")]
    pub user_id: Option<String>,
    /// Quote text.
    #[schema(example = "Ceci est une nouvelle citation.")]
    pub quote: Option<String>,
}

/// Payload returned once a quote is stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddQuoteResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier allocated to the new quote.
    pub id: QuoteId,
}

/// Body accepted by [`update_quote`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateQuoteRequest {
    /// Replacement quote text.
    #[schema(example = "Ceci est une citation mise à jour.")]
    pub quote: Option<String>,
}

fn validation_error(err: QuoteValidationError) -> Error {
    let (field, code) = match err {
        QuoteValidationError::MissingUserId => ("user_id", "missing_user_id"),
        QuoteValidationError::MissingText => ("quote", "missing_quote"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Welcome banner on the modification root.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome banner", body = MessageResponse),
    ),
    tag = "modification"
)]
#[get("/")]
pub async fn home() -> web::Json<MessageResponse> {
    web::Json(MessageResponse {
        message: "welcome to the quotes modification API".to_owned(),
    })
}

/// Store a new quote.
#[utoipa::path(
    post,
    path = "/quotes",
    request_body = AddQuoteRequest,
    responses(
        (status = 201, description = "Quote stored", body = AddQuoteResponse),
        (status = 400, description = "A required field is missing or empty", body = Error),
    ),
    tag = "modification"
)]
#[post("/quotes")]
pub async fn add_quote(
    state: web::Data<HttpState>,
    payload: web::Json<AddQuoteRequest>,
) -> ApiResult<HttpResponse> {
    let AddQuoteRequest { user_id, quote } = payload.into_inner();
    let draft = QuoteDraft::new(user_id.unwrap_or_default(), quote.unwrap_or_default())
        .map_err(validation_error)?;
    let id = state.quotes.add(&draft).await?;
    Ok(HttpResponse::Created().json(AddQuoteResponse {
        message: "quote added".to_owned(),
        id,
    }))
}

/// Replace the text of an existing quote.
#[utoipa::path(
    put,
    path = "/quotes/{id}",
    params(("id" = u64, Path, description = "Identifier of the quote to update")),
    request_body = UpdateQuoteRequest,
    responses(
        (status = 200, description = "Quote updated", body = MessageResponse),
        (status = 400, description = "Replacement text is missing or empty", body = Error),
        (status = 404, description = "No quote with this identifier", body = Error),
    ),
    tag = "modification"
)]
#[put("/quotes/{id}")]
pub async fn update_quote(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<UpdateQuoteRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let text = payload.into_inner().quote.unwrap_or_default();
    if text.is_empty() {
        return Err(validation_error(QuoteValidationError::MissingText));
    }
    state
        .quotes
        .update_text(QuoteId::new(path.into_inner()), &text)
        .await?;
    Ok(web::Json(MessageResponse {
        message: "quote updated".to_owned(),
    }))
}

/// Remove an existing quote.
#[utoipa::path(
    delete,
    path = "/quotes/{id}",
    params(("id" = u64, Path, description = "Identifier of the quote to delete")),
    responses(
        (status = 200, description = "Quote deleted", body = MessageResponse),
        (status = 404, description = "No quote with this identifier", body = Error),
    ),
    tag = "modification"
)]
#[delete("/quotes/{id}")]
pub async fn delete_quote(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.quotes.delete(QuoteId::new(path.into_inner())).await?;
    Ok(web::Json(MessageResponse {
        message: "quote deleted".to_owned(),
    }))
}
