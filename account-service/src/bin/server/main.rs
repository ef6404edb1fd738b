use std::sync::Arc;
use std::time::Duration;

use account_service::config::Config;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::auth::JwtAuthService;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::user::ports::AuthService;
use account_service::user::ports::AuthUseCases;
use auth::Authenticator;
use auth::RevocationStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // Invalid configuration is fatal: the error propagates and the
    // process exits non-zero before binding anything.
    let config = Config::load()?;

    tracing::info!(
        port = config.server.port,
        token_ttl_days = config.jwt.expiration_days,
        compaction_interval_secs = config.revocation.compaction_interval_secs,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(max_connections = 5, "Database connection pool created");

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!("Database migrations completed");

    let revocations = Arc::new(RevocationStore::new());
    let compaction = revocations.spawn_compaction(Duration::from_secs(
        config.revocation.compaction_interval_secs,
    ));

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::days(config.jwt.expiration_days),
        Arc::clone(&revocations),
    ));
    let auth_service = Arc::new(JwtAuthService::new(authenticator));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let use_cases: Arc<dyn AuthUseCases> = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&auth_service),
    ));

    let router = create_router(use_cases, auth_service as Arc<dyn AuthService>, &config.rate_limit);

    let address = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Http server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    compaction.abort();
    pg_pool.close().await;

    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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
