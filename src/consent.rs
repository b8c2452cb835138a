// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consent gateway.
//!
//! Invoked from the consent-confirmation link embedded in the opt-in message,
//! not from the button click. The control is a two-way toggle, not a one-way
//! accept: `unknown` and `denied` move to `allowed`, `allowed` moves to
//! `denied`. Failures here are soft: logged, the displayed label does not
//! advance, nothing crashes.

use tracing::warn;

use crate::error::SubscribeError;
use crate::models::{ConsentState, WalletAddress};
use crate::state::AppState;

/// Refresh the consent list and read the current state for an address.
pub async fn read_consent(
    state: &AppState,
    address: &WalletAddress,
) -> Result<ConsentState, SubscribeError> {
    state
        .network
        .refresh_consent_list()
        .await
        .map_err(|e| SubscribeError::ConsentUpdateFailed(e.to_string()))?;

    state
        .network
        .consent_state(address)
        .await
        .map_err(|e| SubscribeError::ConsentUpdateFailed(e.to_string()))
}

/// Toggle the consent state for an address and mirror the result locally.
///
/// Reads the fresh network state first, so a toggle always moves from what
/// the network currently holds, not from a stale local view. Returns the new
/// state on success.
pub async fn toggle_consent(
    state: &AppState,
    address: &WalletAddress,
) -> Result<ConsentState, SubscribeError> {
    let current = read_consent(state, address).await?;
    let next = current.toggled();

    let mutation = match next {
        ConsentState::Allowed => state.network.allow(std::slice::from_ref(address)).await,
        ConsentState::Denied => state.network.deny(std::slice::from_ref(address)).await,
        // toggled() never yields Unknown.
        ConsentState::Unknown => Ok(()),
    };
    mutation.map_err(|e| SubscribeError::ConsentUpdateFailed(e.to_string()))?;

    // Mirror into the local record. The network mutation already committed,
    // so a store failure only delays the local view until the next refresh.
    if let Err(e) = state.store.set_consent_state(address, next) {
        warn!(address = %address, error = %e, "Failed to mirror consent state locally");
    }

    Ok(next)
}

/// Best-effort view of the consent state when the network is unavailable:
/// the locally mirrored state, or `unknown` for addresses we have never seen.
pub fn stored_consent(state: &AppState, address: &WalletAddress) -> ConsentState {
    match state.store.get(address) {
        Ok(Some(record)) => record.consent_state,
        Ok(None) => ConsentState::Unknown,
        Err(e) => {
            warn!(address = %address, error = %e, "Failed to read stored consent state");
            ConsentState::Unknown
        }
    }
}
