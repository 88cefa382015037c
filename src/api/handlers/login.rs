use crate::{
    api::handlers::error_response,
    auth::{models::AccountPublicView, AuthService},
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    #[schema(value_type = String)]
    pub password: SecretString,
    pub fingerprint: String,
    pub totp: String,
    pub challenge_response: String,
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session authorized; public account view", body = AccountPublicView),
        (status = 401, description = "Unknown email or wrong password", body = String),
        (status = 403, description = "Untrusted device, invalid code, or rejected challenge", body = String),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    service: Extension<AuthService>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match service.login(
        &request.email,
        &request.password,
        &request.fingerprint,
        &request.totp,
        &request.challenge_response,
    ) {
        Ok(view) => Json(view).into_response(),
        Err(err) => {
            debug!("Login rejected: {}", err);
            error_response(&err).into_response()
        }
    }
}
