//! # Web Interface
//!
//! Axum server exposing the assistant over HTTP. It shares the one
//! [`AssistantContext`] with the voice loop, so reminders created here
//! are delivered by the same monitor, and the conversation log shows
//! both voice and web traffic.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

pub mod handlers;
pub mod rate_limit;

pub use rate_limit::RateLimiter;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use tower_http::trace::TraceLayer;

use crate::intents::{AssistantContext, Dispatcher};

/// Requests allowed per client per window on mutating routes.
const RATE_LIMIT_MAX: usize = 30;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(ctx: Arc<AssistantContext>) -> Self {
        AppState {
            dispatcher: Arc::new(Dispatcher::new(ctx)),
            limiter: Arc::new(RateLimiter::new(RATE_LIMIT_MAX, RATE_LIMIT_WINDOW)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(handlers::status))
        .route("/api/text", post(handlers::text))
        .route("/api/conversation", get(handlers::conversation))
        .route(
            "/api/reminders",
            get(handlers::list_reminders).post(handlers::create_reminder),
        )
        .route("/api/settings", get(handlers::settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the web interface. Runs until the process exits.
pub async fn serve(state: AppState, bind_addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("web interface listening on {}", listener.local_addr()?);
    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_state(ctx: AssistantContext) -> AppState {
    AppState::new(Arc::new(ctx))
}
