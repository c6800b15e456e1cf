//! # Vaultwatch — Copy-Trading Vault Dashboard Backend
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐   GET /api/hyperliquid   ┌──────────────────────┐   POST /info    ┌──────────────┐
//!  │  Dashboard   │ ───────────────────────▶ │  Axum handlers       │ ──────────────▶ │  Hyperliquid │
//!  │  (browser)   │   GET /api/positions     │  ├─ fanout           │ ◀────────────── │  info API    │
//!  └──────────────┘   GET /api/depositors    │  ├─ normalize        │                 └──────────────┘
//!          ▲          GET /api/share-card    │  └─ share_card       │
//!          └──────────── JSON, no-store ─────┴──────────────────────┘
//! ```
//!
//! ## Environment Variables
//!
//! See [`config`]; `RUST_LOG` controls the tracing filter
//! (default `vaultwatch=debug`).

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod engine;
mod error;
mod hyperliquid;
mod models;
mod routes;
mod state;

use config::Config;
use routes::{
    debug::{debug_hlp, get_meta},
    depositors::get_depositors,
    positions::get_positions,
    registry::{get_vault, list_vaults},
    share::get_share_card,
    vault::{get_vault_summary, health_check},
};
use state::{build_state, SharedState};

// ─── Router ───────────────────────────────────────────────────────────────────

pub(crate) fn build_router(state: SharedState) -> Router {
    // Read-only dashboard API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Vault data ───────────────────────────────────────────────────────
        .route("/api/hyperliquid",  get(get_vault_summary))
        .route("/api/positions",    get(get_positions))
        .route("/api/depositors",   get(get_depositors))
        .route("/api/share-card",   get(get_share_card))
        // ── Registry / exchange metadata ─────────────────────────────────────
        .route("/api/vaults",       get(list_vaults))
        .route("/api/vaults/:id",   get(get_vault))
        .route("/api/meta",         get(get_meta))
        // ── Diagnostics ──────────────────────────────────────────────────────
        .route("/api/debug-hlp",    get(debug_hlp))
        .route("/health",           get(health_check))
        // ── Middleware ───────────────────────────────────────────────────────
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ─── Entry Point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional, prod can use real env vars) ─────────────────
    dotenvy::dotenv().ok();

    // ── 2. Initialise structured logging ─────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env()
            .add_directive("vaultwatch=debug".parse()?)
            .add_directive("tower_http=info".parse()?))
        .init();

    info!(
        r#"

  ╔═══════════════════════════════════════════════╗
  ║        VAULTWATCH — Vault Dashboard API       ║
  ║        Rust + Axum  ·  Hyperliquid proxy      ║
  ╚═══════════════════════════════════════════════╝"#
    );

    // ── 3. Config + shared state ─────────────────────────────────────────────
    let config = Config::from_env()?;
    let addr = config.bind_addr;

    info!(
        upstream   = %config.info_url,
        timeout    = ?config.upstream_timeout,
        hlp_vaults = ?config.hlp_vaults,
        "Config loaded"
    );

    let app = build_router(build_state(config));

    // ── 4. Bind & Serve ──────────────────────────────────────────────────────
    info!(?addr, "🚀 Vaultwatch server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
