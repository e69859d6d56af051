use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use ark_booking::config::{Config, DocumentStoreConfig, ObjectStoreConfig};
use ark_booking::store::http::HttpObjectStore;
use ark_booking::store::local::LocalObjectStore;
use ark_booking::store::memory::MemoryDocumentStore;
use ark_booking::store::postgres::PgDocumentStore;
use ark_booking::store::{DocumentStore, ObjectStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting ARK booking");

    let documents: Arc<dyn DocumentStore> = match &config.document_store {
        DocumentStoreConfig::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Migrations applied");

            Arc::new(PgDocumentStore::new(pool))
        }
        DocumentStoreConfig::Memory => {
            tracing::warn!("Using in-memory document store; requests are lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };

    let objects: Arc<dyn ObjectStore> = match &config.object_store {
        ObjectStoreConfig::Local { dir } => {
            tokio::fs::create_dir_all(dir).await?;
            tracing::info!("Storing uploads under {}", dir.display());
            Arc::new(LocalObjectStore::new(dir.clone(), &config.base_url))
        }
        ObjectStoreConfig::Http {
            endpoint,
            public_url,
            token,
        } => {
            tracing::info!("Storing uploads at {endpoint}");
            Arc::new(HttpObjectStore::new(endpoint.clone(), public_url.clone(), token.clone())?)
        }
    };

    let addr = SocketAddr::new(config.host, config.port);
    let (app, state) = ark_booking::build_app(config, documents, objects);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = ark_booking::sweeper::spawn(state, shutdown_rx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    let _ = shutdown_tx.send(true);
    let _ = sweeper.await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
