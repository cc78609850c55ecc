//! # HTTP Server for Flyer PDF Generation
//!
//! Serves the two endpoints the flyer editor talks to: login validation and
//! the multipart PDF renderer.
//!
//! ## Usage
//!
//! ```bash
//! newhome serve --listen 0.0.0.0:5000
//! ```

mod handlers;
mod state;

pub use state::{AppState, Credentials, ServerConfig};

use axum::{
    extract::DefaultBodyLimit,
    routing::post,
    Router,
};

use crate::error::NewHomeError;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use newhome::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), newhome::error::NewHomeError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:5000".to_string(),
///     credentials_path: None,
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), NewHomeError> {
    let app_state = AppState::new(config.clone());

    let app = Router::new()
        .route("/api/login", post(handlers::auth::login))
        // 50MB limit to leave room for four photos plus a QR image
        .route(
            "/api/pdf",
            post(handlers::pdf::generate).layer(DefaultBodyLimit::max(50 * 1024 * 1024)),
        )
        .with_state(app_state);

    println!("NewHome PDF server starting...");
    println!("Listening on: {}", config.listen_addr);
    println!();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            NewHomeError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| NewHomeError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
