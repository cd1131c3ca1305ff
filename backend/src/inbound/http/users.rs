//! Login and user directory endpoints.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::User;
use crate::inbound::http::bearer::BearerToken;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Credentials submitted to [`login`].
///
/// Both fields are optional at the transport layer: an absent field simply
/// never matches a stored user, so the response is the same unauthorized
/// error as a wrong password rather than a validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account name to authenticate as.
    #[schema(example = "admin")]
    pub name: Option<String>,
    /// Password for the account.
    #[schema(example = "admin123")]
    pub password: Option<String>,
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Signed token to present on protected routes.
    pub token: String,
}

/// Exchange credentials for a signed token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Credentials rejected", body = Error),
    ),
    tag = "auth"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { name, password } = payload.into_inner();
    let credentials =
        LoginCredentials::new(name.unwrap_or_default(), password.unwrap_or_default());
    let token = state.auth.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: "authentication succeeded".to_owned(),
        token,
    }))
}

/// List every provisioned user.
///
/// Requires a valid token. The listing includes stored passwords; see the
/// notes on [`crate::domain::user`].
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All provisioned users", body = [User]),
        (status = 401, description = "Token missing, expired, or malformed", body = Error),
    ),
    security(("bearer_token" = [])),
    tag = "auth"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<Vec<User>>> {
    state.tokens.verify(token.token())?;
    let users = state.users.list().await?;
    Ok(web::Json(users))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::RecordStore;
    use crate::domain::token::TokenSigner;
    use crate::domain::user;
    use crate::outbound::store::MemoryRecordStore;

    const SECRET: &str = "users-test-secret";

    async fn seeded_state() -> web::Data<HttpState> {
        let store = MemoryRecordStore::new();
        let admin = User::new("1", "admin", "admin123");
        let key = user::user_key(admin.id());
        store
            .put_record(&key, &admin.record_fields())
            .await
            .expect("put user record");
        store
            .index_add(user::USERS_INDEX, &key)
            .await
            .expect("index user record");
        web::Data::new(HttpState::new(Arc::new(store), SECRET))
    }

    #[actix_web::test]
    async fn login_returns_a_token_with_a_confirmation_message() {
        let state = seeded_state().await;
        let app = test::init_service(App::new().app_data(state).service(login)).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "name": "admin", "password": "admin123" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "authentication succeeded");
        assert!(!body["token"].as_str().expect("token string").is_empty());
    }

    #[actix_web::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let state = seeded_state().await;
        let app = test::init_service(App::new().app_data(state).service(login)).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "name": "admin", "password": "nope" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["message"], "incorrect name or password");
    }

    #[actix_web::test]
    async fn login_with_missing_fields_is_unauthorized_not_invalid() {
        let state = seeded_state().await;
        let app = test::init_service(App::new().app_data(state).service(login)).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn listing_requires_a_token() {
        let state = seeded_state().await;
        let app = test::init_service(App::new().app_data(state).service(list_users)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/users").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "invalid or missing token");
    }

    #[actix_web::test]
    async fn listing_with_a_valid_token_exposes_stored_users() {
        let state = seeded_state().await;
        let app = test::init_service(App::new().app_data(state).service(list_users)).await;
        let token = TokenSigner::new(SECRET).issue("1").expect("issue token");

        let req = test::TestRequest::get()
            .uri("/users")
            .insert_header(("Authorization", token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Vec<User> = test::read_body_json(res).await;
        assert_eq!(body, vec![User::new("1", "admin", "admin123")]);
    }

    #[actix_web::test]
    async fn listing_rejects_a_foreign_token() {
        let state = seeded_state().await;
        let app = test::init_service(App::new().app_data(state).service(list_users)).await;
        let token = TokenSigner::new("other-secret").issue("1").expect("issue");

        let req = test::TestRequest::get()
            .uri("/users")
            .insert_header(("Authorization", token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
