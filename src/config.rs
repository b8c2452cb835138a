// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the subscription database | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `PUBLIC_BASE_URL` | Public URL of this service (frame post + consent links) | `http://localhost:8080` |
//! | `DIRECTORY_API_BASE_URL` | Farcaster hub HTTP API for verification lookups | `https://hub.farcaster.standardcrypto.vc:2281` |
//! | `DIRECTORY_API_KEY` | Optional API key for the directory service | Unset |
//! | `XMTP_GATEWAY_BASE_URL` | XMTP gateway sidecar exposing the client API | `http://localhost:5555` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the subscription database directory.
///
/// The subscription database (`subscriptions.redb`) lives under this
/// directory. It is created on first start if missing.
///
/// # Default
/// `/data`
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the public base URL of this service.
///
/// Used to build the frame `post_url` and the consent-confirmation link
/// embedded in opt-in messages. Must be reachable by frame hosts and by
/// subscribers following the link.
pub const PUBLIC_BASE_URL_ENV: &str = "PUBLIC_BASE_URL";

/// Default public base URL when `PUBLIC_BASE_URL` is unset (local dev).
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
