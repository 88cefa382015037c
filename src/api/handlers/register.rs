use crate::{api::handlers::error_response, auth::AuthService};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[schema(value_type = String)]
    pub password: SecretString,
    pub user_agent: String,
    pub screen: String,
}

/// One-time setup payload; the paraphrase and TOTP secret are never
/// disclosed again after this response.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub account_id: String,
    pub username: String,
    pub email: String,
    pub totp_secret: String,
    pub totp_provisioning_image: String,
    pub fingerprint: String,
    pub salt: String,
    pub recovery_paraphrase: String,
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; one-time setup material", body = RegisterResponse),
        (status = 400, description = "Missing field or disallowed email domain", body = String),
        (status = 409, description = "Email already registered", body = String),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn register(
    service: Extension<AuthService>,
    payload: Option<Json<RegisterRequest>>,
) -> impl IntoResponse {
    let request: RegisterRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    debug!("register request: {:?}", request);

    match service.register(
        &request.username,
        &request.email,
        &request.password,
        &request.user_agent,
        &request.screen,
    ) {
        Ok(output) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                account_id: output.account_id,
                username: output.username,
                email: output.email,
                totp_secret: output.totp_secret,
                totp_provisioning_image: output.totp_provisioning_image,
                fingerprint: output.fingerprint,
                salt: output.salt,
                recovery_paraphrase: output.recovery_paraphrase,
            }),
        )
            .into_response(),
        Err(err) => {
            error!("Registration failed: {}", err);
            error_response(&err).into_response()
        }
    }
}
