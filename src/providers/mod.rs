// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! External collaborator seams.
//!
//! The orchestrator talks to two external services through trait objects so
//! deployments can swap implementations and tests can inject mocks:
//!
//! - [`FidDirectory`] - maps a Farcaster fid to its verified wallet addresses
//! - [`MessagingNetwork`] - XMTP client surface: reachability, conversations,
//!   message delivery, and the per-address consent list
//!
//! Both are constructor-injected via [`crate::state::AppState`]; there are no
//! ambient singletons.

use async_trait::async_trait;

use crate::models::{ConsentState, WalletAddress};

pub mod directory;
pub mod xmtp;

pub use directory::HubDirectory;
pub use xmtp::XmtpGateway;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Request(String),

    #[error("directory response was invalid: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("XMTP gateway request failed: {0}")]
    Request(String),

    #[error("XMTP gateway response was invalid: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// Conversation Handle
// =============================================================================

/// An open XMTP conversation, owned for the duration of a single send.
///
/// Never persisted; obtained from [`MessagingNetwork::new_conversation`] and
/// consumed by one [`MessagingNetwork::send`].
#[derive(Debug, Clone)]
pub struct ConversationHandle {
    /// The peer this conversation addresses.
    pub peer: WalletAddress,
    /// Network topic identifying the conversation.
    pub topic: String,
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Directory lookup: Farcaster fid → verified wallet addresses.
#[async_trait]
pub trait FidDirectory: Send + Sync {
    /// All verified wallet addresses for a fid, in directory order.
    ///
    /// An empty list is a successful lookup with no verifications; transport
    /// or decoding failures are errors.
    async fn verified_addresses(&self, fid: u64) -> Result<Vec<WalletAddress>, DirectoryError>;
}

/// XMTP client surface consumed by the orchestrator and consent gateway.
#[async_trait]
pub trait MessagingNetwork: Send + Sync {
    /// Whether the address is reachable on the XMTP network. Pure query.
    async fn can_message(&self, address: &WalletAddress) -> Result<bool, NetworkError>;

    /// Open (or reuse) a direct conversation with the address.
    async fn new_conversation(
        &self,
        address: &WalletAddress,
    ) -> Result<ConversationHandle, NetworkError>;

    /// Send one text message into the conversation.
    async fn send(&self, conversation: &ConversationHandle, text: &str)
        -> Result<(), NetworkError>;

    /// Pull the latest consent list from the network.
    async fn refresh_consent_list(&self) -> Result<(), NetworkError>;

    /// Current consent state for an address.
    async fn consent_state(&self, address: &WalletAddress) -> Result<ConsentState, NetworkError>;

    /// Mark the addresses as allowed on the consent list.
    async fn allow(&self, addresses: &[WalletAddress]) -> Result<(), NetworkError>;

    /// Mark the addresses as denied on the consent list.
    async fn deny(&self, addresses: &[WalletAddress]) -> Result<(), NetworkError>;
}

// =============================================================================
// Test Doubles
// =============================================================================
