//! # HTTP Front End
//!
//! Serves the shipped poster designs over HTTP: a request names a design
//! and its dynamic fields, the server renders the poster and streams the
//! encoded image back with the right MIME type and a download filename.
//!
//! ## Usage
//!
//! ```bash
//! cartel serve --listen 0.0.0.0:8080 --templates ./poster-templates
//! ```
//!
//! Then request e.g.
//! `http://localhost:8080/poster?design=event&when=Tuesdays&where=Wembley&size=50&type=png`.

mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::error::CartelError;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Directory holding the design template images.
    pub template_dir: PathBuf,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
}

/// Start the HTTP server.
pub async fn serve(config: ServerConfig) -> Result<(), CartelError> {
    let state = Arc::new(AppState {
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/poster", get(handlers::poster))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    println!("Cartel HTTP server starting...");
    println!("Listening on: {}", config.listen_addr);
    println!("Templates: {}", config.template_dir.display());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            CartelError::Service(format!("failed to bind to {}: {e}", config.listen_addr))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| CartelError::Service(format!("server error: {e}")))?;

    Ok(())
}
