//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{
    AuthConfig, MailSettings, PgUserDirectory, RedisPendingStore, SmtpCodeMailer, auth_router,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Pending-state cache connection
    let redis_url =
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    let redis_client = redis::Client::open(redis_url)?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    tracing::info!("Connected to pending-state cache");

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load the signing secret from environment
        let secret_b64 =
            env::var("AUTH_TOKEN_SECRET").expect("AUTH_TOKEN_SECRET must be set in production");
        let token_secret = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        let password_pepper = env::var("AUTH_PASSWORD_PEPPER")
            .ok()
            .map(|p| Engine::decode(&general_purpose::STANDARD, &p))
            .transpose()?;
        AuthConfig {
            token_secret,
            password_pepper,
            ..AuthConfig::default()
        }
    };
    let request_timeout = auth_config.request_timeout;

    // Mail transport (no-op when SMTP_HOST is unset)
    let mail_settings = MailSettings {
        smtp_host: env::var("SMTP_HOST").unwrap_or_default(),
        smtp_port: env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587),
        smtp_username: env::var("SMTP_USERNAME").ok(),
        smtp_password: env::var("SMTP_PASSWORD").ok(),
        smtp_from: env::var("SMTP_FROM")
            .unwrap_or_else(|_| "Storefront <no-reply@localhost.localdomain>".to_string()),
        use_starttls: env::var("SMTP_STARTTLS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true),
    };

    let directory = PgUserDirectory::new(pool.clone());
    let pending = RedisPendingStore::new(redis_conn);
    let mailer = SmtpCodeMailer::new(&mail_settings)
        .map_err(|e| anyhow::anyhow!("mailer setup failed: {e}"))?;

    tracing::info!(smtp_enabled = mailer.is_enabled(), "Mail transport ready");

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth_router(directory, pending, mailer, auth_config)
                .map_err(|e| anyhow::anyhow!("router setup failed: {e}"))?,
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
