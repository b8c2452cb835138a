// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded subscription database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `subscribers`: canonical (lowercased) wallet address → serialized
//!   [`Subscriber`] (JSON bytes)
//!
//! Single-key operations only; no multi-key transactions. redb write
//! transactions are serialized, which is what makes [`SubscriptionDb::mark_subscribed`]
//! a usable compare-and-set: at most one caller per address observes the
//! unsubscribed → subscribed transition.

use std::path::Path;

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::models::{ConsentState, Subscriber, WalletAddress};

/// Primary table: canonical address → serialized Subscriber (JSON bytes).
const SUBSCRIBERS: TableDefinition<&str, &[u8]> = TableDefinition::new("subscribers");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// SubscriptionDb
// =============================================================================

/// Embedded ACID subscription store.
pub struct SubscriptionDb {
    db: Database,
}

impl SubscriptionDb {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create the table so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SUBSCRIBERS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Fetch the subscriber record for an address, if one exists.
    ///
    /// Lookup is case-insensitive: addresses are keyed by their canonical
    /// lowercased form.
    pub fn get(&self, address: &WalletAddress) -> StoreResult<Option<Subscriber>> {
        let key = address.canonical();
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SUBSCRIBERS)?;

        match table.get(key.as_str())? {
            Some(raw) => Ok(Some(serde_json::from_slice(raw.value())?)),
            None => Ok(None),
        }
    }

    /// Conditionally mark an address as subscribed.
    ///
    /// Returns `true` if this call performed the unsubscribed → subscribed
    /// transition, `false` if the record was already subscribed (a concurrent
    /// click committed first, or the caller raced a stale read). The check
    /// and the write happen inside a single write transaction, so at most
    /// one caller per address ever returns `true` for a given subscription.
    ///
    /// An existing consent state is preserved across the transition.
    pub fn mark_subscribed(&self, address: &WalletAddress) -> StoreResult<bool> {
        let key = address.canonical();
        let write_txn = self.db.begin_write()?;
        let won;
        {
            let mut table = write_txn.open_table(SUBSCRIBERS)?;
            let existing = match table.get(key.as_str())? {
                Some(raw) => Some(serde_json::from_slice::<Subscriber>(raw.value())?),
                None => None,
            };

            match existing {
                Some(record) if record.subscribed => {
                    won = false;
                }
                prior => {
                    let record = Subscriber {
                        address: address.clone(),
                        subscribed: true,
                        consent_state: prior
                            .map(|r| r.consent_state)
                            .unwrap_or(ConsentState::Unknown),
                        subscribed_at: Some(Utc::now()),
                    };
                    let json = serde_json::to_vec(&record)?;
                    table.insert(key.as_str(), json.as_slice())?;
                    won = true;
                }
            }
        }
        write_txn.commit()?;
        Ok(won)
    }

    /// Record the local view of an address's consent state.
    ///
    /// Creates the record if the address has never been seen (consent can be
    /// toggled without a prior subscription). The subscribed flag and
    /// timestamp are preserved.
    pub fn set_consent_state(
        &self,
        address: &WalletAddress,
        state: ConsentState,
    ) -> StoreResult<()> {
        let key = address.canonical();
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SUBSCRIBERS)?;
            let existing = match table.get(key.as_str())? {
                Some(raw) => Some(serde_json::from_slice::<Subscriber>(raw.value())?),
                None => None,
            };

            let record = match existing {
                Some(mut record) => {
                    record.consent_state = state;
                    record
                }
                None => Subscriber {
                    address: address.clone(),
                    subscribed: false,
                    consent_state: state,
                    subscribed_at: None,
                },
            };
            let json = serde_json::to_vec(&record)?;
            table.insert(key.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Cheap readiness probe: can we still open a read transaction?
    pub fn ping(&self) -> bool {
        self.db.begin_read().is_ok()
    }
}
