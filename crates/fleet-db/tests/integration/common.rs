use fleet_db::Database;
use sqlx::sqlite::SqlitePoolOptions;

/// Open a fresh in-memory SQLite database with migrations applied.
///
/// A single connection keeps every query on the same in-memory instance.
pub async fn setup_test_db() -> Database {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    let db = Database::from_pool(pool);
    db.migrate().await.expect("Failed to run migrations");
    db
}
