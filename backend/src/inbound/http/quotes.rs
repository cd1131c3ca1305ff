//! Public quote listing and search endpoints.

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::error::Error;
use crate::domain::quote::Quote;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query string accepted by [`search_quotes`].
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring to look for in quote text.
    pub keyword: Option<String>,
}

/// List every stored quote.
#[utoipa::path(
    get,
    path = "/quotes",
    responses(
        (status = 200, description = "All stored quotes", body = [Quote]),
    ),
    tag = "quotes"
)]
#[get("/quotes")]
pub async fn list_quotes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Quote>>> {
    let quotes = state.quotes.list().await?;
    Ok(web::Json(quotes))
}

/// Search quote text for a keyword.
#[utoipa::path(
    get,
    path = "/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Quotes whose text contains the keyword", body = [Quote]),
        (status = 400, description = "Keyword missing or empty", body = Error),
    ),
    tag = "quotes"
)]
#[get("/search")]
pub async fn search_quotes(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<Quote>>> {
    let keyword = query.keyword.as_deref().unwrap_or_default();
    let quotes = state.quotes.search(keyword).await?;
    Ok(web::Json(quotes))
}
