use actix_web::{web, HttpServer};
use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tl_api::app::{create_app, HttpSettings};
use tl_api::state::AppState;
use tl_core::repositories::{CredentialStore, RevocationLedger};
use tl_core::services::{
    AuthService, BcryptVerifier, LedgerCleanupConfig, LedgerCleanupService, PasswordVerifier,
    SigningKeyRing, TokenCodec, TokenService, TokenServiceConfig,
};
use tl_infra::cache::RedisClient;
use tl_infra::{
    DatabasePool, InMemoryCredentialStore, InMemoryRevocationLedger, MySqlCredentialStore,
    RedisRevocationLedger,
};
use tl_shared::config::{AppConfig, DatabaseConfig, LedgerBackend, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = tl_api::config::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);
    config.validate().map_err(anyhow::Error::msg)?;

    info!(environment = %config.environment, "Starting Tokenline API server");

    let keys = SigningKeyRing::from_config(&config.auth.jwt, Utc::now())
        .context("Failed to load signing keys")?;
    info!(
        algorithm = ?keys.algorithm(),
        kid = keys.current_kid(),
        previous_kid = ?keys.previous_kid(),
        "Signing keys loaded"
    );
    let codec = TokenCodec::new(
        keys,
        &config.auth.jwt.issuer,
        config.auth.jwt.audience.as_deref(),
    );
    let password_verifier = Arc::new(BcryptVerifier::new(config.auth.bcrypt_cost));

    match (config.ledger.backend, config.database.clone()) {
        (LedgerBackend::Memory, None) => {
            let users = seeded_memory_store(password_verifier.as_ref()).await?;
            serve(&config, Arc::new(InMemoryRevocationLedger::new()), users, codec, password_verifier).await
        }
        (LedgerBackend::Memory, Some(database)) => {
            let users = mysql_store(&database).await?;
            serve(&config, Arc::new(InMemoryRevocationLedger::new()), users, codec, password_verifier).await
        }
        (LedgerBackend::Redis, None) => {
            let users = seeded_memory_store(password_verifier.as_ref()).await?;
            let ledger = redis_ledger(&config).await?;
            serve(&config, ledger, users, codec, password_verifier).await
        }
        (LedgerBackend::Redis, Some(database)) => {
            let users = mysql_store(&database).await?;
            let ledger = redis_ledger(&config).await?;
            serve(&config, ledger, users, codec, password_verifier).await
        }
    }
}

async fn serve<L, U, H>(
    config: &AppConfig,
    ledger: Arc<L>,
    users: Arc<U>,
    codec: TokenCodec,
    password_verifier: Arc<H>,
) -> anyhow::Result<()>
where
    L: RevocationLedger + 'static,
    U: CredentialStore + 'static,
    H: PasswordVerifier,
{
    let token_service = Arc::new(TokenService::new(
        ledger,
        users.clone(),
        codec,
        TokenServiceConfig::from(&config.auth.jwt),
    ));

    let cleanup = LedgerCleanupService::new(
        token_service.clone(),
        LedgerCleanupConfig {
            interval_seconds: config.ledger.cleanup_interval_secs,
            enabled: config.ledger.cleanup_enabled,
        },
    );
    Arc::new(cleanup).start_background_task();

    let auth_service = Arc::new(AuthService::new(users, token_service, password_verifier));
    let state = web::Data::new(AppState::new(auth_service));

    let settings =
        HttpSettings::new(&config.server, &config.cors).with_cookies(config.auth.cookies.clone());
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Binding HTTP server");

    let mut server = HttpServer::new(move || create_app(state.clone(), &settings))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn redis_ledger(config: &AppConfig) -> anyhow::Result<Arc<RedisRevocationLedger>> {
    let client = RedisClient::new(config.cache.clone())
        .await
        .context("Failed to connect to Redis")?;
    let retention = config.auth.jwt.refresh_token_expiry.max(1) as u64;
    Ok(Arc::new(RedisRevocationLedger::new(client, retention)))
}

async fn mysql_store(database: &DatabaseConfig) -> anyhow::Result<Arc<MySqlCredentialStore>> {
    let pool = DatabasePool::new(database)
        .await
        .context("Failed to connect to the credential database")?;
    info!("{}", pool.get_statistics());
    Ok(Arc::new(MySqlCredentialStore::new(pool.get_pool().clone())))
}

/// In-memory directory, optionally seeded from `TOKENLINE_SEED_USER=identifier:password`
async fn seeded_memory_store<H: PasswordVerifier>(
    password_verifier: &H,
) -> anyhow::Result<Arc<InMemoryCredentialStore>> {
    warn!("DATABASE_URL not set, using the in-memory credential store");
    let store = InMemoryCredentialStore::new();

    if let Ok(seed) = std::env::var("TOKENLINE_SEED_USER") {
        let (identifier, password) = seed
            .split_once(':')
            .context("TOKENLINE_SEED_USER must be identifier:password")?;
        let password_hash = password_verifier.hash(password)?;
        store.register(identifier, &password_hash).await;
        store.activate(identifier).await;
        info!(subject = %identifier, "Seeded active user");
    }

    Ok(Arc::new(store))
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
