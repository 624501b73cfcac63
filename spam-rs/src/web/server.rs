//! Web server for the detector form

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{self, AppState};
use crate::error::Result;
use crate::inference::SpamDetector;

pub struct WebServer {
    state: Arc<AppState>,
    addr: String,
}

impl WebServer {
    pub fn new(detector: SpamDetector, addr: String) -> Self {
        Self {
            state: Arc::new(AppState { detector }),
            addr,
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::index).post(handlers::analyze))
            .route("/api/predict", post(handlers::predict))
            .route("/health", get(handlers::health))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until the process exits
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.addr).await?;
        self.run_with_listener(listener).await
    }

    /// Serve on an already bound listener
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<()> {
        info!("Spam detector UI listening on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
