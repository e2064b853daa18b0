use axum::http::{HeaderValue, Method, header};
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use parley_core::health::{healthz, readyz};
use parley_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::state::AppState;

/// CORS layer restricted to the configured origin allow-list.
fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .settings
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "skipping CORS origin that is not a valid header value");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state);
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use axum_test::TestServer;

    fn server_with(settings: Settings) -> TestServer {
        TestServer::new(build_router(AppState::new(settings))).unwrap()
    }

    #[tokio::test]
    async fn healthz_is_routed() {
        let response = server_with(Settings::default()).get("/healthz").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn readyz_is_routed() {
        let response = server_with(Settings::default()).get("/readyz").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn cors_echoes_a_configured_origin() {
        let server = server_with(Settings::default());
        let response = server
            .get("/healthz")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
            .await;
        response.assert_status_ok();
        let allow_origin = response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        assert_eq!(allow_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[tokio::test]
    async fn cors_ignores_an_unlisted_origin() {
        let server = server_with(Settings::default());
        let response = server
            .get("/healthz")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://evil.example"))
            .await;
        // The request still succeeds; the browser-facing allow header is
        // simply absent.
        response.assert_status_ok();
        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );
    }

    #[tokio::test]
    async fn every_response_carries_a_request_id() {
        let response = server_with(Settings::default()).get("/healthz").await;
        assert!(response.headers().get("x-request-id").is_some());
    }
}
