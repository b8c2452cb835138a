// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};

use tracing_subscriber::EnvFilter;
use url::Url;

use frame_subscribe_server::api::router;
use frame_subscribe_server::config::{DATA_DIR_ENV, DEFAULT_PUBLIC_BASE_URL, PUBLIC_BASE_URL_ENV};
use frame_subscribe_server::providers::{HubDirectory, XmtpGateway};
use frame_subscribe_server::state::AppState;
use frame_subscribe_server::storage::SubscriptionDb;

#[tokio::main]
async fn main() {
    init_tracing();

    // Open the subscription database
    let data_dir = PathBuf::from(env::var(DATA_DIR_ENV).unwrap_or_else(|_| "/data".to_string()));
    let store = SubscriptionDb::open(&data_dir.join("subscriptions.redb"))
        .expect("Failed to open subscription database");

    // Construct collaborator clients once per process; everything downstream
    // receives them through AppState.
    let directory = HubDirectory::from_env().expect("Failed to build directory client");
    let network = XmtpGateway::from_env().expect("Failed to build XMTP gateway client");

    let public_base_url =
        env::var(PUBLIC_BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string());
    Url::parse(&public_base_url).expect("PUBLIC_BASE_URL is not a valid URL");

    let state = AppState::new(store, Arc::new(directory), Arc::new(network), public_base_url);
    let app = router(state);

    // Parse bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(%addr, "Frame subscribe server listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("Shutdown signal received");
}
