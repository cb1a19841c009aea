//! HTTP server for the static site.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServeConfig;
use crate::site::Site;
use crate::{Error, Result};

const NOT_FOUND_BODY: &str = "<!DOCTYPE html>\n<html><head><title>404 Not Found</title></head>\
<body><h1>404 Not Found</h1><p>The requested page does not exist.</p></body></html>\n";

pub fn build_router(site: Arc<Site>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/{*path}", get(asset))
        .layer(TraceLayer::new_for_http())
        .with_state(site)
}

async fn index(State(site): State<Arc<Site>>) -> Response {
    respond(&site, "index.html").await
}

async fn asset(State(site): State<Arc<Site>>, Path(path): Path<String>) -> Response {
    respond(&site, &path).await
}

async fn respond(site: &Site, path: &str) -> Response {
    match site.asset(path).await {
        Ok(Some(asset)) => {
            ([(header::CONTENT_TYPE, asset.content_type)], asset.body).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY)).into_response(),
        Err(err) => {
            tracing::error!(path, error = %err, "failed to read asset");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

/// Serves until the process is stopped.
pub async fn serve(config: &ServeConfig) -> Result<()> {
    let listener = TcpListener::bind(config.addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, root = ?config.site_root, "serving pokemon index");
    axum::serve(listener, build_router(Arc::new(config.site())))
        .await
        .map_err(Error::from)
}

/// Binds `addr` and serves `site` on a background task. Returns the bound
/// address, so port 0 picks an ephemeral port.
pub async fn spawn(addr: SocketAddr, site: Site) -> Result<SocketAddr> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = build_router(Arc::new(site));
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!(error = %err, "site server stopped");
        }
    });
    tracing::debug!(addr = %local_addr, "spawned site server");
    Ok(local_addr)
}
