use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::Shell;
use crate::paraphraser::Paraphraser;
use crate::{api, form};

/// Mount the adapters `shell` asks for, plus `/health`.
pub fn build_router(paraphraser: Arc<Paraphraser>, shell: Shell) -> Router {
    let mut router = Router::new().route("/health", get(|| async { "ok" }));
    if shell.serves_api() {
        router = router.merge(api::router(Arc::clone(&paraphraser)));
    }
    if shell.serves_form() {
        router = router.merge(form::router(Arc::clone(&paraphraser)));
    }
    router.layer(TraceLayer::new_for_http())
}

pub async fn serve(
    paraphraser: Arc<Paraphraser>,
    shell: Shell,
    bind: SocketAddr,
) -> anyhow::Result<()> {
    let router = build_router(paraphraser, shell);
    let listener = TcpListener::bind(bind).await?;
    tracing::info!(%bind, shell = ?shell, "Starting paraphraser HTTP server");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("HTTP server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
