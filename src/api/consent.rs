// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consent confirmation endpoints.
//!
//! The opt-in message links here. The page shows the current consent state
//! and a single button that toggles it. A failed toggle is soft: the page
//! re-renders with the stale label and HTTP 200.
//!
//! The address arrives as a query parameter and is reflected into the page,
//! so both endpoints reject anything that is not a well-formed 0x-hex
//! address before touching the network or rendering.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;

use crate::{
    consent,
    error::ApiError,
    models::{ConsentState, WalletAddress},
    state::AppState,
};

#[derive(Deserialize, IntoParams)]
pub struct ConsentQuery {
    pub address: WalletAddress,
}

/// Reject addresses that are not `0x` + 40 hex before they reach the
/// network or the rendered page.
fn validated_address(query: ConsentQuery) -> Result<WalletAddress, ApiError> {
    if !query.address.is_well_formed() {
        return Err(ApiError::bad_request(
            "address must be 0x followed by 40 hex characters",
        ));
    }
    Ok(query.address)
}

/// Render the consent page with the exact `Consent State: <state>` label.
pub(crate) fn render_consent_page(address: &WalletAddress, state: ConsentState) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Broadcast consent</title></head>\n\
         <body>\n\
         <p>Consent State: {state}</p>\n\
         <form method=\"post\" action=\"/consent/toggle?address={address}\">\n\
         <button type=\"submit\">Toggle consent</button>\n\
         </form>\n\
         </body>\n\
         </html>\n"
    )
}

/// Show the consent page for an address.
#[utoipa::path(
    get,
    path = "/consent",
    params(ConsentQuery),
    tag = "Consent",
    responses(
        (status = 200, description = "Consent page with the current state", content_type = "text/html"),
        (status = 400, description = "Malformed address")
    )
)]
pub async fn consent_page(
    State(state): State<AppState>,
    Query(params): Query<ConsentQuery>,
) -> Result<Html<String>, ApiError> {
    let address = validated_address(params)?;
    let current = match consent::read_consent(&state, &address).await {
        Ok(current) => current,
        Err(e) => {
            warn!(address = %address, error = %e, "Consent read failed, showing stored state");
            consent::stored_consent(&state, &address)
        }
    };
    Ok(Html(render_consent_page(&address, current)))
}

/// Toggle the consent state for an address and re-render the page.
#[utoipa::path(
    post,
    path = "/consent/toggle",
    params(ConsentQuery),
    tag = "Consent",
    responses(
        (status = 200, description = "Consent page with the updated (or stale, on soft failure) state", content_type = "text/html"),
        (status = 400, description = "Malformed address")
    )
)]
pub async fn toggle_consent(
    State(state): State<AppState>,
    Query(params): Query<ConsentQuery>,
) -> Result<Html<String>, ApiError> {
    let address = validated_address(params)?;
    let shown = match consent::toggle_consent(&state, &address).await {
        Ok(next) => next,
        Err(e) => {
            // Soft failure: log and keep the previous label.
            warn!(address = %address, error = %e, "Consent toggle failed");
            consent::stored_consent(&state, &address)
        }
    };
    Ok(Html(render_consent_page(&address, shown)))
}
