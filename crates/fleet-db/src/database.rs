use fleet_core::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::admin_repository::AdministratorRepository;
use crate::config::DatabaseConfig;
use crate::vehicle_repository::VehicleRepository;

/// Central database facade — owns the connection pool, runs migrations,
/// and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect: {e}")))?;

        tracing::debug!("Connected to database at {}", config.url);
        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Get a [`VehicleRepository`] backed by this pool.
    pub fn vehicle_repo(&self) -> VehicleRepository {
        VehicleRepository::new(self.pool.clone())
    }

    /// Get an [`AdministratorRepository`] backed by this pool.
    pub fn admin_repo(&self) -> AdministratorRepository {
        AdministratorRepository::new(self.pool.clone())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
