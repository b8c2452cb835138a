// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Farcaster hub directory client: fid → verified wallet addresses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::{DirectoryError, FidDirectory};
use crate::models::WalletAddress;

const DEFAULT_DIRECTORY_BASE_URL: &str = "https://hub.farcaster.standardcrypto.vc:2281";

/// HTTP client for a Farcaster hub's verification endpoint.
///
/// One lookup per click; directory data is authoritative and slow-changing,
/// so there is no retry layer here.
#[derive(Debug, Clone)]
pub struct HubDirectory {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

/// Subset of the hub's `verificationsByFid` response we care about.
#[derive(Debug, Deserialize)]
struct VerificationsResponse {
    #[serde(default)]
    messages: Vec<VerificationMessage>,
}

#[derive(Debug, Deserialize)]
struct VerificationMessage {
    data: Option<VerificationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerificationData {
    verification_add_eth_address_body: Option<VerificationBody>,
}

#[derive(Debug, Deserialize)]
struct VerificationBody {
    address: Option<String>,
}

impl HubDirectory {
    pub fn from_env() -> Result<Self, DirectoryError> {
        let base_url = env_or_default("DIRECTORY_API_BASE_URL", DEFAULT_DIRECTORY_BASE_URL);
        let api_key = env_optional("DIRECTORY_API_KEY");

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| DirectoryError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            api_key,
            http,
        })
    }

    fn verifications_url(&self, fid: u64) -> String {
        format!(
            "{}/v1/verificationsByFid?fid={fid}",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl FidDirectory for HubDirectory {
    async fn verified_addresses(&self, fid: u64) -> Result<Vec<WalletAddress>, DirectoryError> {
        let mut request = self.http.get(self.verifications_url(fid));
        if let Some(key) = &self.api_key {
            request = request.header("api_key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DirectoryError::Request(format!(
                "directory returned HTTP {}",
                response.status()
            )));
        }

        let body: VerificationsResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;

        let addresses = collect_addresses(body);
        info!(fid, count = addresses.len(), "Resolved verified addresses");
        Ok(addresses)
    }
}

/// Pull the verified addresses out of the response, preserving hub order.
fn collect_addresses(body: VerificationsResponse) -> Vec<WalletAddress> {
    body.messages
        .into_iter()
        .filter_map(|message| {
            message
                .data?
                .verification_add_eth_address_body?
                .address
                .filter(|address| !address.is_empty())
        })
        .map(WalletAddress::from)
        .collect()
}

fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
