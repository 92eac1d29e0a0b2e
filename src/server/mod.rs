use crate::core::relay::ContactRelay;
use crate::core::{ContactSubmission, MailTransport, RelayResponse};
use crate::utils::error::{RelayError, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub const CONTACT_PATH: &str = "/api/contact";
pub const HEALTH_PATH: &str = "/health";

pub fn build_router<T>(relay: Arc<ContactRelay<T>>, static_dir: Option<&Path>) -> Router
where
    T: MailTransport + 'static,
{
    let router = Router::new()
        .route(CONTACT_PATH, post(contact_handler::<T>))
        .route(HEALTH_PATH, get(health_handler))
        .with_state(relay);

    // 大頭照、履歷 PDF 等靜態檔案
    let router = match static_dir {
        Some(dir) => {
            tracing::info!("🗂️ Serving static assets from: {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// 請求本文在處理邊界內解析，格式錯誤與寄送失敗一樣回 500
async fn contact_handler<T>(
    State(relay): State<Arc<ContactRelay<T>>>,
    body: Bytes,
) -> (StatusCode, Json<RelayResponse>)
where
    T: MailTransport + 'static,
{
    let submission: ContactSubmission = match serde_json::from_slice(&body) {
        Ok(submission) => submission,
        Err(e) => {
            let e = RelayError::from(e);
            tracing::error!("❌ Invalid contact payload: {} (Category: {:?})", e, e.category());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayResponse::failed()),
            );
        }
    };

    let response = relay.relay(&submission).await;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(response))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn serve(router: Router, bind: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!("🚀 Contact relay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Contact relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
