//! API module for HTTP and WebSocket endpoints
//!
//! This module provides the REST surface and WebSocket relay endpoints.

pub mod http;
pub mod rest;
pub mod websocket;

pub use http::create_router;
pub use websocket::AppState;
