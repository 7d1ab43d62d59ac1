use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use log::info;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::utils::error::{BoxResult, QuillError};

/// Serve the generated site directory over HTTP.
///
/// This is a build-tool convenience for previewing output locally; the
/// published site itself is plain static files.
pub async fn serve<P: AsRef<Path>>(destination: P, host: &str, port: u16) -> BoxResult<()> {
    let destination = destination.as_ref().to_path_buf();
    if !destination.exists() {
        return Err(QuillError::Server(format!(
            "Destination directory does not exist: {} (build the site first)",
            destination.display()
        ))
        .into());
    }

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| QuillError::Server(format!("Invalid address {}:{}: {}", host, port, e)))?;

    let app = Router::new()
        .fallback_service(ServeDir::new(&destination).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http());

    info!("Serving {} at http://{}", destination.display(), addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| QuillError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| QuillError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
