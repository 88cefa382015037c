//! OpenAPI document assembly.

use axum::Json;
use utoipa::OpenApi;

use crate::api::handlers::{
    bind_device::{BindDeviceRequest, BindDeviceResponse},
    health::Health,
    login::LoginRequest,
    register::{RegisterRequest, RegisterResponse},
};
use crate::auth::models::{AccountPublicView, TrustedDevice};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "forumweb-auth",
        description = "Multi-factor device-binding authentication for ForumWeb"
    ),
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::register::register,
        crate::api::handlers::login::login,
        crate::api::handlers::bind_device::bind_device,
    ),
    components(schemas(
        Health,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        BindDeviceRequest,
        BindDeviceResponse,
        AccountPublicView,
        TrustedDevice,
    )),
    tags(
        (name = "auth", description = "Registration, login, and device binding"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

/// Assembled OpenAPI document for the service.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Serve the OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
