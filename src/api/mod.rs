// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{ConsentState, FramePayload, Subscriber, UntrustedData, WalletAddress},
    state::AppState,
};

pub mod consent;
pub mod frame;
pub mod health;

pub fn router(state: AppState) -> Router {
    // Frame hosts POST to the exact configured URL, so routes stay flat
    // (no /v1 nesting).
    let routes = Router::new()
        .route("/frame", post(frame::frame_click))
        .route("/consent", get(consent::consent_page))
        .route("/consent/toggle", post(consent::toggle_consent))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        frame::frame_click,
        consent::consent_page,
        consent::toggle_consent,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            FramePayload,
            UntrustedData,
            WalletAddress,
            ConsentState,
            Subscriber,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Frame", description = "Frame click handling"),
        (name = "Consent", description = "Consent confirmation and toggling"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::providers::mock::{test_state, MockDirectory, MockNetwork};

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (state, _dir) = test_state(
            Arc::new(MockDirectory::default()),
            Arc::new(MockNetwork::default()),
        );
        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn frame_click_round_trip_through_router() {
        let address = "0xABCdef0123456789abcdef0123456789ABCDEF01";
        let directory = Arc::new(MockDirectory::with_address(address));
        let network = Arc::new(MockNetwork::default());
        let (state, _dir) = test_state(directory, network.clone());
        let app = router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/frame")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"untrustedData":{"fid":10952,"buttonIndex":1}}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(body.contains("Subscribed! Check your inbox for a confirmation link."));
        assert_eq!(network.sent_count(), 1);
    }

    #[tokio::test]
    async fn markup_in_consent_address_is_never_reflected() {
        let (state, _dir) = test_state(
            Arc::new(MockDirectory::default()),
            Arc::new(MockNetwork::default()),
        );
        let app = router(state);

        let request = Request::builder()
            .method("GET")
            .uri("/consent?address=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert!(!body.contains("<script>"));
    }

    #[tokio::test]
    async fn malformed_frame_payload_is_rejected() {
        let (state, _dir) = test_state(
            Arc::new(MockDirectory::default()),
            Arc::new(MockNetwork::default()),
        );
        let app = router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/frame")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"untrustedData":{"buttonIndex":1}}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
