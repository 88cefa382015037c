use crate::{auth::AuthService, GIT_COMMIT_HASH};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    accounts: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Account store is reachable", body = Health),
        (status = 503, description = "Account store cannot be loaded", body = Health)
    ),
    tag = "health"
)]
// axum handler for health
pub async fn health(service: Extension<AuthService>) -> impl IntoResponse {
    let accounts_ok = match service.account_count() {
        Ok(_) => true,
        Err(error) => {
            error!("Failed to load account collection: {}", error);
            false
        }
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        accounts: if accounts_ok {
            "ok".to_string()
        } else {
            "error".to_string()
        },
    };

    let status = if accounts_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(health))
}
