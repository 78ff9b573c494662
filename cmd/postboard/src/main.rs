//! # postboard
//!
//! Entry point: loads settings, installs tracing, picks the store, serves.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, AppState};
use auth_adapters::{Argon2Hasher, HashCost};
use configs::{DatabaseSettings, LogFormat, LogSettings, Settings};
use domains::{PostRepository, UserRepository};
#[cfg(feature = "db-postgres")]
use secrecy::ExposeSecret;
use secrecy::SecretString;
use storage_adapters::MemoryStore;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type Stores = (Arc<dyn UserRepository>, Arc<dyn PostRepository>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    init_tracing(&settings.log);

    let hasher = Argon2Hasher::new(HashCost {
        memory_kib: settings.hashing.memory_kib,
        iterations: settings.hashing.iterations,
        parallelism: settings.hashing.parallelism,
    })
    .context("Invalid hashing settings")?;

    let (users, posts) = open_stores(&settings.database).await?;
    let state = AppState::new(users, posts, Arc::new(hasher));
    state
        .accounts
        .prepare()
        .await
        .context("Failed to prepare account service")?;
    let app = router(state);

    let address = settings.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn open_stores(database: &DatabaseSettings) -> anyhow::Result<Stores> {
    let Some(url) = &database.url else {
        warn!("No database URL configured; data lives in memory and is lost on exit");
        let store = Arc::new(MemoryStore::new());
        let users: Arc<dyn UserRepository> = store.clone();
        let posts: Arc<dyn PostRepository> = store;
        return Ok((users, posts));
    };

    open_postgres(url, database.max_connections).await
}

#[cfg(feature = "db-postgres")]
async fn open_postgres(url: &SecretString, max_connections: u32) -> anyhow::Result<Stores> {
    let store = Arc::new(
        storage_adapters::PgStore::connect(url.expose_secret(), max_connections)
            .await
            .context("Failed to connect to Postgres")?,
    );
    info!("Connected to Postgres");
    let users: Arc<dyn UserRepository> = store.clone();
    let posts: Arc<dyn PostRepository> = store;
    Ok((users, posts))
}

#[cfg(not(feature = "db-postgres"))]
async fn open_postgres(_url: &SecretString, _max_connections: u32) -> anyhow::Result<Stores> {
    anyhow::bail!("a database URL is configured but the db-postgres feature is disabled")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
