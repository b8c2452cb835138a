// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Frame Subscribe Server - Double Opt-In XMTP Subscriptions
//!
//! This crate turns an anonymous Farcaster frame button click into a durable,
//! privacy-respecting XMTP subscription record. A click resolves the clicker's
//! verified wallet address, checks reachability on the XMTP network, delivers
//! an opt-in message carrying a consent link, and persists subscription state.
//! The consent link leads to a second entry point that toggles the per-address
//! consent state on the network, completing the double opt-in.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `consent` - Consent gateway (refresh, read, toggle)
//! - `providers` - Directory and XMTP gateway clients
//! - `storage` - Embedded subscription database (redb)
//! - `subscribe` - Subscription orchestrator state machine

pub mod api;
pub mod config;
pub mod consent;
pub mod error;
pub mod models;
pub mod providers;
pub mod state;
pub mod storage;
pub mod subscribe;
