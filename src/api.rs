//! HTTP API for the order bot
//!
//! Webhook verification and delivery endpoints.

mod handlers;
mod types;
mod webhook;

pub use handlers::create_router;

use crate::runtime::OrderRuntime;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<OrderRuntime>,
    /// Secret expected during webhook verification
    pub verify_token: Arc<str>,
}

impl AppState {
    pub fn new(runtime: OrderRuntime, verify_token: &str) -> Self {
        Self {
            runtime: Arc::new(runtime),
            verify_token: Arc::from(verify_token),
        }
    }
}
