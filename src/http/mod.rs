//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the fetch endpoints
//! - Request handlers for metadata lookup and download
//! - JSON error bodies with the client/server status split
//! - CORS middleware

pub mod handlers;
pub mod routes;

pub use routes::create_router;
