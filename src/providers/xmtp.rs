// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! XMTP gateway client.
//!
//! The actual XMTP client (key bundle, encryption, transport) runs in a
//! gateway sidecar; this module speaks its HTTP API. The gateway exposes the
//! standard client surface: `canMessage`, conversation open/send, and the
//! consent list (`refresh`, per-address state, `allow`, `deny`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::{ConversationHandle, MessagingNetwork, NetworkError};
use crate::models::{ConsentState, WalletAddress};

const DEFAULT_GATEWAY_BASE_URL: &str = "http://localhost:5555";

#[derive(Debug, Clone)]
pub struct XmtpGateway {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct CanMessageResponse {
    can_message: bool,
}

#[derive(Debug, Deserialize)]
struct ConversationResponse {
    topic: String,
}

#[derive(Debug, Deserialize)]
struct ConsentStateResponse {
    state: ConsentState,
}

impl XmtpGateway {
    pub fn from_env() -> Result<Self, NetworkError> {
        let base_url = env_or_default("XMTP_GATEWAY_BASE_URL", DEFAULT_GATEWAY_BASE_URL);

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| NetworkError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// POST a JSON body and check for a success status. Each mutating call
    /// carries a fresh request id so gateway logs can be correlated with ours.
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, NetworkError> {
        let request_id = Uuid::new_v4();
        let response = self
            .http
            .post(self.url(path))
            .header("x-request-id", request_id.to_string())
            .json(body)
            .send()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NetworkError::Request(format!(
                "gateway returned HTTP {} for {path}",
                response.status()
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl MessagingNetwork for XmtpGateway {
    async fn can_message(&self, address: &WalletAddress) -> Result<bool, NetworkError> {
        let body = json!({ "address": address });
        let response = self.post_json("/can-message", &body).await?;
        let parsed: CanMessageResponse = response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;
        Ok(parsed.can_message)
    }

    async fn new_conversation(
        &self,
        address: &WalletAddress,
    ) -> Result<ConversationHandle, NetworkError> {
        let body = json!({ "peer_address": address });
        let response = self.post_json("/conversations", &body).await?;
        let parsed: ConversationResponse = response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;

        Ok(ConversationHandle {
            peer: address.clone(),
            topic: parsed.topic,
        })
    }

    async fn send(
        &self,
        conversation: &ConversationHandle,
        text: &str,
    ) -> Result<(), NetworkError> {
        let body = json!({ "topic": conversation.topic, "content": text });
        self.post_json("/messages", &body).await?;
        info!(peer = %conversation.peer, "Delivered XMTP message");
        Ok(())
    }

    async fn refresh_consent_list(&self) -> Result<(), NetworkError> {
        self.post_json("/consent/refresh", &json!({})).await?;
        Ok(())
    }

    async fn consent_state(&self, address: &WalletAddress) -> Result<ConsentState, NetworkError> {
        let response = self
            .http
            .get(self.url(&format!("/consent/{}", address.canonical())))
            .send()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NetworkError::Request(format!(
                "gateway returned HTTP {} for consent read",
                response.status()
            )));
        }

        let parsed: ConsentStateResponse = response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;
        Ok(parsed.state)
    }

    async fn allow(&self, addresses: &[WalletAddress]) -> Result<(), NetworkError> {
        let body = json!({ "addresses": addresses });
        self.post_json("/consent/allow", &body).await?;
        Ok(())
    }

    async fn deny(&self, addresses: &[WalletAddress]) -> Result<(), NetworkError> {
        let body = json!({ "addresses": addresses });
        self.post_json("/consent/deny", &body).await?;
        Ok(())
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
