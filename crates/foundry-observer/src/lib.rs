//! Observer API server for the Orbital Artisan Foundry.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/days`) for real-time day summary
//!   streaming via [`tokio::sync::broadcast`]
//! - **REST endpoints** for reading station state (ledger, offer board,
//!   active process, operations log) and for the two player actions
//!   (accept a contract, refresh the offer board)
//! - **Minimal HTML dashboard** (`GET /`) showing the day, the resource
//!   counters, and links to API endpoints
//!
//! # Architecture
//!
//! The observer shares the [`Station`](foundry_core::Station) with the
//! game loop behind an [`RwLock`](tokio::sync::RwLock). Reads take the
//! read half; the accept and refresh endpoints take the write half so a
//! transition is applied whole before any reader can observe it.
//! `WebSocket` clients receive day summaries via a broadcast channel
//! with automatic lag handling.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, spawn_observer, start_server};
pub use state::{AppState, DayBroadcast};
