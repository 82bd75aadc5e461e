//! HTTP webhook server.

use std::net::SocketAddr;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use tokio::sync::oneshot;
use tracing::{error, info, trace, warn};

use courier_core::{BoxedWebhookHandler, TransportError, TransportResult, WebhookRequest};

// =============================================================================
// ListenerHandle
// =============================================================================

/// Handle to a running webhook listener.
///
/// Dropping this handle stops the listener.
#[derive(Debug)]
pub struct ListenerHandle {
    /// Unique identifier for this listener.
    pub id: String,
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ListenerHandle {
    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops the listener.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// =============================================================================
// Server
// =============================================================================

/// Starts serving `handler` on `POST <path>` at `addr`.
///
/// Binding to port `0` picks a free port; see [`ListenerHandle::local_addr`].
pub async fn listen(
    addr: &str,
    path: &str,
    handler: BoxedWebhookHandler,
) -> TransportResult<ListenerHandle> {
    listen_routes(addr, vec![(path.to_string(), handler)]).await
}

/// Starts one listener serving several webhook handlers, one per path.
pub async fn listen_routes(
    addr: &str,
    routes: Vec<(String, BoxedWebhookHandler)>,
) -> TransportResult<ListenerHandle> {
    if routes.is_empty() {
        return Err(TransportError::InvalidConfig(
            "at least one webhook route is required".to_string(),
        ));
    }

    let mut router = Router::new();
    let mut paths = Vec::with_capacity(routes.len());
    for (path, handler) in routes {
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        router = router.route(&path, post(webhook_handler).with_state(handler));
        paths.push(path);
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TransportError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, paths = ?paths, "HTTP server listening");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
            info!("HTTP server shutting down");
        });

        if let Err(e) = server.await {
            error!(error = %e, "HTTP server error");
        }
    });

    Ok(ListenerHandle {
        id: format!("http-server-{local_addr}"),
        local_addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// HTTP POST handler.
async fn webhook_handler(
    State(handler): State<BoxedWebhookHandler>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    trace!(len = body.len(), "Received webhook POST");

    let mut request = WebhookRequest::new(body.to_vec());
    for (name, value) in &headers {
        match value.to_str() {
            Ok(value) => request.insert_header(name.as_str(), value),
            Err(_) => warn!(header = %name, "Dropping non-ASCII header value"),
        }
    }

    let response = handler.on_request(request).await;
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, response.body)
}
