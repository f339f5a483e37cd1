//! HTTP API: server wiring, endpoint catalog, and request/response mapping.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
