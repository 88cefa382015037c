use crate::{
    api::handlers::error_response,
    auth::{models::TrustedDevice, AuthService},
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BindDeviceRequest {
    pub email: String,
    #[schema(value_type = String)]
    pub paraphrase: SecretString,
    pub user_agent: String,
    pub screen: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BindDeviceResponse {
    pub trusted_devices: Vec<TrustedDevice>,
    pub fingerprint: String,
}

#[utoipa::path(
    post,
    path = "/bind-device",
    request_body = BindDeviceRequest,
    responses(
        (status = 200, description = "Device bound; updated trust list", body = BindDeviceResponse),
        (status = 400, description = "Missing field", body = String),
        (status = 401, description = "Paraphrase incorrect", body = String),
        (status = 404, description = "No matching account", body = String),
        (status = 409, description = "Device already bound", body = String),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn bind_device(
    service: Extension<AuthService>,
    payload: Option<Json<BindDeviceRequest>>,
) -> impl IntoResponse {
    let request: BindDeviceRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match service.bind_device(
        &request.email,
        &request.paraphrase,
        &request.user_agent,
        &request.screen,
    ) {
        Ok(output) => Json(BindDeviceResponse {
            trusted_devices: output.trusted_devices,
            fingerprint: output.fingerprint,
        })
        .into_response(),
        Err(err) => {
            debug!("Device binding rejected: {}", err);
            error_response(&err).into_response()
        }
    }
}
