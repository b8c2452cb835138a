// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and persistence data structures used by
//! the subscription service. All types derive `Serialize`, `Deserialize`,
//! and `ToSchema` for automatic JSON handling and OpenAPI documentation.
//!
//! ## Wallet Address Type
//!
//! The [`WalletAddress`] newtype wraps Ethereum-style addresses (0x-prefixed,
//! 40 hex characters). It provides type safety and clear semantics.
//!
//! ## Model Categories
//!
//! - **Subscribers**: durable subscription + consent records
//! - **Frame payloads**: the validated click event posted by frame hosts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Ethereum-compatible wallet address wrapper.
///
/// Provides type safety for wallet addresses throughout the service.
/// Format: `0x` followed by 40 hexadecimal characters (20 bytes).
///
/// # Example
///
/// ```rust,ignore
/// let addr = WalletAddress::from("0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    /// Canonical (lowercased) form, used as the storage key.
    pub fn canonical(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Whether this is a well-formed address: `0x` followed by 40 hex
    /// characters. Endpoints that reflect an address back to the client
    /// must reject anything else.
    pub fn is_well_formed(&self) -> bool {
        let Some(hex) = self.0.strip_prefix("0x") else {
            return false;
        };
        hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// Consent State
// =============================================================================

/// Per-address consent tri-state maintained by the XMTP network.
///
/// Governs whether messages from this sender are surfaced to the recipient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConsentState {
    /// The recipient has neither allowed nor denied this sender.
    Unknown,
    /// The recipient accepts messages from this sender.
    Allowed,
    /// The recipient has blocked this sender.
    Denied,
}

impl ConsentState {
    /// The state reached by one application of the consent toggle.
    ///
    /// `Unknown` and `Denied` both move to `Allowed`; `Allowed` moves to
    /// `Denied`. The toggle never yields `Unknown`, so starting from
    /// `Unknown` two applications land on `Denied`, not back on `Unknown`.
    pub fn toggled(self) -> ConsentState {
        match self {
            ConsentState::Allowed => ConsentState::Denied,
            ConsentState::Unknown | ConsentState::Denied => ConsentState::Allowed,
        }
    }
}

impl std::fmt::Display for ConsentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConsentState::Unknown => "unknown",
            ConsentState::Allowed => "allowed",
            ConsentState::Denied => "denied",
        };
        write!(f, "{s}")
    }
}

// =============================================================================
// Subscriber Record
// =============================================================================

/// A durable subscription record, keyed by wallet address.
///
/// The wallet address is the sole join key between the social identity and
/// the messaging identity; the Farcaster fid is never persisted here. Records
/// are never deleted in the normal flow: consent denial is a state, not a
/// deletion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Subscriber {
    /// The subscriber's wallet address (primary key).
    pub address: WalletAddress,
    /// Whether the opt-in message has been delivered and the subscription
    /// recorded.
    pub subscribed: bool,
    /// Local view of the network-side consent state for this address.
    pub consent_state: ConsentState,
    /// When the subscription was recorded, if it has been.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Frame Click Payload
// =============================================================================

/// The unverified portion of a frame click payload.
///
/// Frame hosts forward button clicks as a POST whose `untrustedData` carries
/// the clicker's fid and the index of the pressed button. Both fields are
/// required; a missing field is a deserialization failure, never a silent
/// default.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    /// Farcaster id of the user who clicked.
    pub fid: u64,
    /// 1-based index of the pressed button.
    pub button_index: u32,
}

/// A frame button click event, consumed once per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FramePayload {
    /// The unverified click data forwarded by the frame host.
    pub untrusted_data: UntrustedData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_from_and_into_string() {
        let from_str: WalletAddress = "abc".into();
        assert_eq!(from_str.0, "abc");

        let from_string: WalletAddress = String::from("def").into();
        assert_eq!(from_string.0, "def");

        let to_string: String = WalletAddress("ghi".into()).into();
        assert_eq!(to_string, "ghi");
    }

    #[test]
    fn wallet_address_canonical_lowercases() {
        let addr = WalletAddress::from("0xABCdef");
        assert_eq!(addr.canonical(), "0xabcdef");
    }

    #[test]
    fn wallet_address_well_formedness() {
        assert!(WalletAddress::from("0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12").is_well_formed());

        assert!(!WalletAddress::from("742d35Cc6634C0532925a3b844Bc9e7595f4aB12").is_well_formed());
        assert!(!WalletAddress::from("0x742d35").is_well_formed());
        assert!(!WalletAddress::from("0x742d35Cc6634C0532925a3b844Bc9e7595f4aB1g").is_well_formed());
        assert!(!WalletAddress::from(r#""><script>alert(1)</script>"#).is_well_formed());
        assert!(!WalletAddress::from("").is_well_formed());
    }

    #[test]
    fn consent_toggle_rules() {
        assert_eq!(ConsentState::Unknown.toggled(), ConsentState::Allowed);
        assert_eq!(ConsentState::Denied.toggled(), ConsentState::Allowed);
        assert_eq!(ConsentState::Allowed.toggled(), ConsentState::Denied);
    }

    #[test]
    fn consent_double_toggle_from_unknown_is_denied() {
        // The unknown/denied collapse makes the toggle non-invertible:
        // unknown -> allowed -> denied, never back to unknown.
        let twice = ConsentState::Unknown.toggled().toggled();
        assert_eq!(twice, ConsentState::Denied);

        let from_denied = ConsentState::Denied.toggled().toggled();
        assert_eq!(from_denied, ConsentState::Denied);
    }

    #[test]
    fn consent_state_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ConsentState::Allowed).unwrap(),
            r#""allowed""#
        );
        let parsed: ConsentState = serde_json::from_str(r#""denied""#).unwrap();
        assert_eq!(parsed, ConsentState::Denied);
    }

    #[test]
    fn frame_payload_deserializes_camel_case() {
        let payload: FramePayload =
            serde_json::from_str(r#"{"untrustedData":{"fid":10952,"buttonIndex":1}}"#).unwrap();
        assert_eq!(payload.untrusted_data.fid, 10952);
        assert_eq!(payload.untrusted_data.button_index, 1);
    }

    #[test]
    fn frame_payload_rejects_missing_fields() {
        let missing_fid = serde_json::from_str::<FramePayload>(
            r#"{"untrustedData":{"buttonIndex":1}}"#,
        );
        assert!(missing_fid.is_err());

        let missing_body = serde_json::from_str::<FramePayload>(r#"{}"#);
        assert!(missing_body.is_err());
    }
}
