//! # Webring API Server
//!
//! HTTP front end for the webring: circular navigation over the member list
//! plus a small picture gallery served from disk.
//!
//! ## Endpoints
//!
//! - `GET /` - Service descriptor
//! - `GET /health` - Liveness and cache status
//! - `GET /next?current=URL` - Member after `current`
//! - `GET /previous?current=URL` - Member before `current`
//! - `GET /random` - Random member
//! - `GET /list` - All members
//! - `GET /pictures/list` - Pictures available in the pictures directory
//! - `GET /pictures/:filename` - A single picture
//!
//! ## Example
//!
//! ```rust,ignore
//! use webring_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config)?;
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for the webring.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server reading members from the configured spreadsheet.
    pub fn new(config: ApiConfig) -> webring_core::Result<Self> {
        Ok(Self::with_state(AppState::new(config)?))
    }

    /// Creates a server around prepared state.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes and layers configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Runs the server on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;

        info!("WebRing API server running on {}", addr);
        info!("Endpoints available:");
        for endpoint in ["GET /next?current=URL", "GET /previous?current=URL", "GET /random", "GET /list"] {
            info!("  {}", endpoint);
        }

        axum::serve(listener, self.router()).await
    }
}
