// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Frame click endpoint.
//!
//! Frame hosts POST the click payload here and render whatever HTML comes
//! back. Every orchestrator outcome, success or failure, becomes an HTTP 200
//! with a button label; a 5xx would make the host show a broken frame. The
//! only 4xx path is payload validation.

use axum::{extract::State, response::Html, Json};
use tracing::warn;

use crate::{
    error::ApiError,
    models::FramePayload,
    state::AppState,
    subscribe,
};

/// Render the one-button frame response for a label.
pub(crate) fn render_frame(label: &str, public_base_url: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta property=\"og:title\" content=\"Subscribe to our broadcast\" />\n\
         <meta property=\"og:image\" content=\"{public_base_url}/frame.png\" />\n\
         <meta property=\"fc:frame\" content=\"vNext\" />\n\
         <meta property=\"fc:frame:image\" content=\"{public_base_url}/frame.png\" />\n\
         <meta property=\"fc:frame:button:1\" content=\"{label}\" />\n\
         <meta property=\"fc:frame:post_url\" content=\"{public_base_url}/frame\" />\n\
         </head>\n\
         <body>{label}</body>\n\
         </html>\n"
    )
}

/// Handle a frame button click.
#[utoipa::path(
    post,
    path = "/frame",
    request_body = FramePayload,
    tag = "Frame",
    responses(
        (status = 200, description = "Frame response with the outcome label", content_type = "text/html"),
        (status = 400, description = "Malformed click payload")
    )
)]
pub async fn frame_click(
    State(state): State<AppState>,
    Json(payload): Json<FramePayload>,
) -> Result<Html<String>, ApiError> {
    let data = payload.untrusted_data;
    if data.fid == 0 {
        return Err(ApiError::bad_request("fid must be nonzero"));
    }
    if data.button_index != 1 {
        return Err(ApiError::bad_request("buttonIndex must be 1"));
    }

    let label = match subscribe::handle_click(&state, data.fid).await {
        Ok(outcome) => outcome.label(),
        Err(e) => {
            warn!(fid = data.fid, error = %e, "Click failed");
            e.label()
        }
    };

    Ok(Html(render_frame(label, &state.public_base_url)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, Json};

    use super::*;
    use crate::models::{UntrustedData, WalletAddress};
    use crate::providers::mock::{test_state, MockDirectory, MockNetwork};

    fn payload(fid: u64, button_index: u32) -> FramePayload {
        FramePayload {
            untrusted_data: UntrustedData { fid, button_index },
        }
    }

    #[tokio::test]
    async fn successful_click_renders_subscribed_label() {
        let address = "0xABCdef0123456789abcdef0123456789ABCDEF01";
        let directory = Arc::new(MockDirectory::with_address(address));
        let network = Arc::new(MockNetwork::default());
        let (state, _dir) = test_state(directory, network.clone());

        let Html(body) = frame_click(State(state.clone()), Json(payload(10952, 1)))
            .await
            .expect("click handled");

        assert!(body.contains(
            r#"<meta property="fc:frame:button:1" content="Subscribed! Check your inbox for a confirmation link." />"#
        ));
        assert!(body.contains(r#"<meta property="fc:frame" content="vNext" />"#));
        assert_eq!(network.sent_count(), 1);

        let record = state
            .store
            .get(&WalletAddress::from(address))
            .unwrap()
            .expect("record stored");
        assert!(record.subscribed);
    }

    #[tokio::test]
    async fn identity_failure_still_renders_a_label() {
        let directory = Arc::new(MockDirectory::default());
        let network = Arc::new(MockNetwork::default());
        let (state, _dir) = test_state(directory, network.clone());

        let Html(body) = frame_click(State(state), Json(payload(99999, 1)))
            .await
            .expect("failure renders, not errors");

        assert!(body.contains("No verified address for this account"));
        assert_eq!(network.sent_count(), 0);
    }

    #[tokio::test]
    async fn off_network_click_renders_not_on_network_label() {
        let directory = Arc::new(MockDirectory::with_address("0xabc"));
        let network = Arc::new(MockNetwork {
            on_network: false,
            ..MockNetwork::default()
        });
        let (state, _dir) = test_state(directory, network);

        let Html(body) = frame_click(State(state), Json(payload(10952, 1)))
            .await
            .expect("click handled");
        assert!(body.contains("Address is not on the XMTP network"));
    }

    #[tokio::test]
    async fn invalid_payload_is_a_named_validation_error() {
        let directory = Arc::new(MockDirectory::with_address("0xabc"));
        let network = Arc::new(MockNetwork::default());
        let (state, _dir) = test_state(directory, network.clone());

        let err = frame_click(State(state.clone()), Json(payload(0, 1)))
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);

        let err = frame_click(State(state), Json(payload(10952, 2)))
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);

        // Validation failures never reach the collaborators.
        assert_eq!(network.sent_count(), 0);
    }

    #[test]
    fn render_frame_embeds_post_url() {
        let body = render_frame("You are already subscribed", "https://frames.example.com");
        assert!(body.contains(
            r#"<meta property="fc:frame:post_url" content="https://frames.example.com/frame" />"#
        ));
        assert!(body.contains("<body>You are already subscribed</body>"));
    }
}
