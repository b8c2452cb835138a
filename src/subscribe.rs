// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Subscription orchestrator.
//!
//! One invocation per frame button click. The click moves through
//! `RESOLVING → CHECKING_NETWORK → MESSAGING → SUBSCRIBED`, with two
//! short-circuit exits (already subscribed, not on network), and every
//! terminal state maps to exactly one user-facing label.
//!
//! Ordering rule: the store write happens strictly AFTER a successful message
//! send, never before. Subscription state and message delivery are not
//! transactional together; a crash between send and write causes a duplicate
//! send on the next click, never a silent subscription with no message. The
//! idempotency check (store read) happens before any external I/O beyond
//! identity resolution, so a re-click after SUBSCRIBED touches neither the
//! network nor the messenger.

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::SubscribeError;
use crate::models::WalletAddress;
use crate::providers::MessagingNetwork;
use crate::state::AppState;

/// Terminal outcome of one click, mapping 1:1 to a frame button label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Opt-in message delivered and subscription recorded.
    Subscribed,
    /// The resolved address was already subscribed; no network or messaging
    /// calls were made (or a concurrent click committed first).
    AlreadySubscribed,
    /// The address is not reachable on the XMTP network.
    NotOnNetwork,
}

impl ClickOutcome {
    /// Fixed frame button label for this outcome (exact, case-sensitive).
    pub fn label(&self) -> &'static str {
        match self {
            ClickOutcome::Subscribed => "Subscribed! Check your inbox for a confirmation link.",
            ClickOutcome::AlreadySubscribed => "You are already subscribed",
            ClickOutcome::NotOnNetwork => "Address is not on the XMTP network",
        }
    }
}

/// Handle one button click end to end.
///
/// All suspension points are the external calls (directory lookup, store
/// read, presence check, conversation open + send, store write), awaited
/// sequentially; each step's input depends on the previous step's output.
pub async fn handle_click(state: &AppState, fid: u64) -> Result<ClickOutcome, SubscribeError> {
    let request_id = Uuid::new_v4();

    // RESOLVING: fid → first verified wallet address.
    let addresses = state.directory.verified_addresses(fid).await?;
    let Some(address) = addresses.into_iter().next() else {
        return Err(SubscribeError::IdentityNotFound(fid));
    };

    // Idempotency check before any further external I/O. The fid is not
    // persisted anywhere past this point; the address is the sole join key.
    if let Some(record) = state.store.get(&address)? {
        if record.subscribed {
            info!(%request_id, address = %address, "Click short-circuited: already subscribed");
            return Ok(ClickOutcome::AlreadySubscribed);
        }
    }

    // CHECKING_NETWORK: transport failure is surfaced as its own error,
    // never folded into a negative reachability result.
    let reachable = state
        .network
        .can_message(&address)
        .await
        .map_err(|e| SubscribeError::PresenceCheckFailed(e.to_string()))?;
    if !reachable {
        return Ok(ClickOutcome::NotOnNetwork);
    }

    // MESSAGING: on failure the store stays untouched, so the next click
    // retries the full messaging step. At-least-once delivery is accepted.
    deliver_opt_in(state.network.as_ref(), &address, &state.public_base_url).await?;

    // SUBSCRIBED: conditional write. A lost compare-and-set means a
    // concurrent click already committed its send-and-mark sequence.
    let won = state.store.mark_subscribed(&address)?;
    if !won {
        warn!(%request_id, address = %address, "Subscription already committed by a concurrent click");
        return Ok(ClickOutcome::AlreadySubscribed);
    }

    info!(%request_id, address = %address, "Subscription recorded");
    Ok(ClickOutcome::Subscribed)
}

/// Open a conversation with the address and deliver the opt-in message.
pub(crate) async fn deliver_opt_in(
    network: &dyn MessagingNetwork,
    address: &WalletAddress,
    public_base_url: &str,
) -> Result<(), SubscribeError> {
    let conversation = network
        .new_conversation(address)
        .await
        .map_err(|e| SubscribeError::MessageDeliveryFailed(e.to_string()))?;

    let text = opt_in_message(public_base_url, address);
    network
        .send(&conversation, &text)
        .await
        .map_err(|e| SubscribeError::MessageDeliveryFailed(e.to_string()))
}

/// Fixed opt-in template embedding the consent-confirmation link.
fn opt_in_message(public_base_url: &str, address: &WalletAddress) -> String {
    format!(
        "You asked to subscribe to our broadcast. Confirm by setting your \
         consent here: {public_base_url}/consent?address={address}"
    )
}
