// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error types.
//!
//! [`ApiError`] covers request validation at the HTTP boundary.
//! [`SubscribeError`] is the orchestrator-level taxonomy: every external-call
//! failure is caught at the orchestrator boundary and mapped to one of its
//! variants, and every variant maps to a fixed user-facing label. Nothing
//! propagates to the request layer as an unhandled fault; the frame host
//! always receives a rendered label, never a raw error payload.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::providers::DirectoryError;
use crate::storage::StoreError;

// =============================================================================
// Subscription Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    /// The directory returned no verified address for this fid. Directory
    /// data is authoritative and slow-changing, so this is terminal for the
    /// click; no retry.
    #[error("no verified address for fid {0}")]
    IdentityNotFound(u64),

    /// The directory lookup itself failed (transport or malformed response).
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The presence check failed at the transport level. Distinct from a
    /// negative reachability result; never mapped to "not on network".
    #[error("presence check failed: {0}")]
    PresenceCheckFailed(String),

    /// Conversation open or message send failed. The store is left
    /// unmodified so the next click retries the full messaging step.
    #[error("message delivery failed: {0}")]
    MessageDeliveryFailed(String),

    /// Consent refresh/read/mutate failed on the confirmation page. Soft:
    /// logged, the displayed label does not advance, no crash.
    #[error("consent update failed: {0}")]
    ConsentUpdateFailed(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl SubscribeError {
    /// Fixed user-facing button label for this failure.
    pub fn label(&self) -> &'static str {
        match self {
            SubscribeError::IdentityNotFound(_) => "No verified address for this account",
            SubscribeError::PresenceCheckFailed(_) => {
                "Could not reach the XMTP network, try again"
            }
            SubscribeError::MessageDeliveryFailed(_) => {
                "Could not deliver the confirmation message, try again"
            }
            SubscribeError::Directory(_)
            | SubscribeError::ConsentUpdateFailed(_)
            | SubscribeError::Store(_) => "Something went wrong, try again",
        }
    }
}

// =============================================================================
// HTTP Validation Errors
// =============================================================================

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }

    #[test]
    fn every_failure_maps_to_a_fixed_label() {
        assert_eq!(
            SubscribeError::IdentityNotFound(99999).label(),
            "No verified address for this account"
        );
        assert_eq!(
            SubscribeError::PresenceCheckFailed("timeout".into()).label(),
            "Could not reach the XMTP network, try again"
        );
        assert_eq!(
            SubscribeError::MessageDeliveryFailed("send failed".into()).label(),
            "Could not deliver the confirmation message, try again"
        );
        assert_eq!(
            SubscribeError::ConsentUpdateFailed("refresh failed".into()).label(),
            "Something went wrong, try again"
        );
    }
}
