//! # seed
//!
//! Registers one account in the configured Postgres database and lists every
//! stored account.
//!
//! ```sh
//! POSTBOARD__DATABASE__URL=postgres://... seed "Alex" alex@example.com 'StrongPassword123!'
//! seed   # list only
//! ```

use std::sync::Arc;

use anyhow::{bail, Context};
use auth_adapters::{Argon2Hasher, HashCost};
use configs::Settings;
use domains::DomainError;
use secrecy::ExposeSecret;
use services::{AccountService, RegisterInput};
use storage_adapters::PgStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let registration = match args.as_slice() {
        [] => None,
        [name, email, password] => Some(RegisterInput {
            name: Some(name.clone()),
            email: Some(email.clone()),
            password: Some(password.clone()),
        }),
        _ => bail!("usage: seed [<name> <email> <password>]"),
    };

    let Some(url) = &settings.database.url else {
        bail!("POSTBOARD__DATABASE__URL is not set");
    };
    let store = Arc::new(
        PgStore::connect(url.expose_secret(), settings.database.max_connections)
            .await
            .context("Failed to connect to Postgres")?,
    );
    info!("Connected to Postgres");

    let hasher = Argon2Hasher::new(HashCost {
        memory_kib: settings.hashing.memory_kib,
        iterations: settings.hashing.iterations,
        parallelism: settings.hashing.parallelism,
    })?;
    let accounts = AccountService::new(store, Arc::new(hasher));

    if let Some(input) = registration {
        match accounts.register(input).await {
            Ok(user) => println!("Saved {} <{}> as {}", user.name, user.email, user.id),
            Err(DomainError::Validation(msg) | DomainError::Conflict(msg)) => {
                bail!("Not saved: {msg}")
            }
            Err(other) => return Err(other.into()),
        }
    }

    let users = accounts.list().await?;
    println!("Total accounts in database: {}", users.len());
    for (i, user) in users.iter().enumerate() {
        println!("  {}. {} <{}> ({})", i + 1, user.name, user.email, user.id);
    }

    Ok(())
}
