//! HTTP application wiring (Axum router + dispatcher).
//!
//! - `routes/`: the endpoint catalog and its registration table
//! - `gateway.rs`: the single Axum handler that feeds every request to the dispatcher
//! - `errors.rs`: reply and failure mapping to HTTP responses

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;

use wirecast_core::{Dispatcher, RegistryError};

use crate::middleware;

pub mod errors;
pub mod gateway;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Routing is not delegated to Axum: every request lands in
/// [`gateway::handle`], which resolves it against the registration table.
pub fn build_app() -> Result<Router, RegistryError> {
    let registry = routes::registry()?;
    tracing::debug!(endpoints = registry.len(), "endpoint registry built");

    let dispatcher = Arc::new(Dispatcher::new(registry));

    Ok(Router::new()
        .fallback(gateway::handle)
        .with_state(dispatcher)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_context))))
}
