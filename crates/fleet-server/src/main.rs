use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use fleet_core::auth::{TokenConfig, TokenService};
use fleet_core::models::NewAdministrator;
use fleet_db::{Database, DatabaseConfig};
use fleet_server::routes;
use fleet_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("fleet_server=info".parse()?)
                .add_directive("fleet_db=info".parse()?),
        )
        .with_target(false)
        .init();

    let token_config = TokenConfig::from_env()?;
    let port = std::env::var("FLEET_SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let db = Database::connect(&DatabaseConfig::from_env()?).await?;
    db.migrate().await?;
    seed_default_admin(&db).await?;

    let state = Arc::new(AppState {
        db,
        tokens: TokenService::new(&token_config),
    });

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Insert the bootstrap administrator unless its email already exists.
///
/// The seed is external configuration (`ADMIN_EMAIL` / `ADMIN_PASSWORD` /
/// `ADMIN_NAME`), not business logic; the password is hashed before it ever
/// reaches the store.
async fn seed_default_admin(db: &Database) -> anyhow::Result<()> {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "123456".to_string());
    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".to_string());

    let repo = db.admin_repo();
    if repo.find_by_email(&email).await?.is_none() {
        let password_hash =
            tokio::task::spawn_blocking(move || fleet_core::hash_password(&password)).await??;
        repo.insert(&NewAdministrator {
            email: email.clone(),
            password_hash,
            name,
        })
        .await?;
        tracing::info!("Seeded bootstrap administrator {email}");
    }

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
