// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::providers::{FidDirectory, MessagingNetwork};
use crate::storage::SubscriptionDb;

/// Shared application state.
///
/// All collaborators are constructed once in `main` and injected here; the
/// store is the only cross-request coordination point. Handlers and the
/// orchestrator never reach for ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SubscriptionDb>,
    pub directory: Arc<dyn FidDirectory>,
    pub network: Arc<dyn MessagingNetwork>,
    /// Public URL of this service, used for the frame post target and the
    /// consent link embedded in opt-in messages.
    pub public_base_url: String,
}

impl AppState {
    pub fn new(
        store: SubscriptionDb,
        directory: Arc<dyn FidDirectory>,
        network: Arc<dyn MessagingNetwork>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            directory,
            network,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }
}
