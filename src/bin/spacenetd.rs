//! SpaceNet claim engine server binary.
//!
//! Binds the admission service's HTTP router on a multi-threaded tokio
//! runtime, serving until SIGINT/SIGTERM triggers graceful shutdown.
//! Exits 0 on clean shutdown, non-zero on startup failure (bind error,
//! backend init failure).

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use spacenet::admission::AdmissionService;
use spacenet::backend::memory::MemoryBackend;
use spacenet::backend::sled_backend::SledBackend;
use spacenet::backend::DurableBackend;
use spacenet::config::ServerConfig;
use spacenet::store::ClaimStore;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let config = ServerConfig::parse();

    let backend: Box<dyn DurableBackend> = if config.has_durable_backend() {
        match SledBackend::open(&config.db) {
            Ok(b) => Box::new(b),
            Err(e) => {
                log::error!("failed to open durable backend at {}: {e}", config.db);
                return ExitCode::FAILURE;
            }
        }
    } else {
        Box::new(MemoryBackend::new())
    };

    let store = match ClaimStore::open(backend) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            log::error!("failed to load claim store: {e}");
            return ExitCode::FAILURE;
        }
    };

    let service = AdmissionService::new(store.clone());
    let app = spacenet::api::router(service);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("failed to bind {addr}: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("spacenetd listening on {addr}");
    let serve_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close();

    match serve_result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves on SIGINT or SIGTERM, triggering graceful shutdown.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
