//! HTTP surface: router assembly and server lifecycle.
//!
//! Requests carry an `x-request-id` (ULID) that is injected when absent,
//! propagated to the response, and attached to the request span.

pub mod handlers;
mod openapi;

pub use openapi::openapi;

use crate::auth::AuthService;
use anyhow::{anyhow, Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request},
    routing::{get, post},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use url::Url;

/// Build the application router with middleware and shared state.
///
/// # Errors
/// Returns an error if `frontend_origin` cannot be parsed into an origin.
pub fn router(service: AuthService, frontend_origin: Option<&str>) -> Result<Router> {
    let cors = cors_layer(frontend_origin)?;

    Ok(Router::new()
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::health::health))
        .route("/register", post(handlers::register::register))
        .route("/login", post(handlers::login::login))
        .route("/bind-device", post(handlers::bind_device::bind_device))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &Request<Body>| {
                        HeaderValue::from_str(Ulid::new().to_string().as_str()).ok()
                    },
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(service)),
        ))
}

/// Start the server.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(port: u16, service: AuthService, frontend_origin: Option<&str>) -> Result<()> {
    let app = router(service, frontend_origin)?;

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

/// Permissive CORS unless an exact frontend origin is configured.
fn cors_layer(frontend_origin: Option<&str>) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    match frontend_origin {
        Some(origin) => Ok(cors.allow_origin(AllowOrigin::exact(parse_origin(origin)?))),
        None => Ok(cors.allow_origin(Any)),
    }
}

fn parse_origin(frontend_base_url: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(frontend_base_url)
        .with_context(|| format!("Invalid frontend origin: {frontend_base_url}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("Frontend origin must include a valid host: {frontend_base_url}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build frontend origin header")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origin_strips_path() {
        let origin = parse_origin("http://localhost:5173/app/").ok();
        assert_eq!(
            origin,
            HeaderValue::from_str("http://localhost:5173").ok()
        );
    }

    #[test]
    fn parse_origin_rejects_garbage() {
        assert!(parse_origin("not a url").is_err());
    }

    #[test]
    fn cors_layer_accepts_missing_origin() {
        assert!(cors_layer(None).is_ok());
        assert!(cors_layer(Some("https://forum.example.com")).is_ok());
        assert!(cors_layer(Some("::::")).is_err());
    }
}
