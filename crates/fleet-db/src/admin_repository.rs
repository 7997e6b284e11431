use fleet_core::error::AppError;
use fleet_core::models::{Administrator, NewAdministrator};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::vehicle_repository::page_bounds;

/// Repository for administrator accounts in SQLite.
#[derive(Clone)]
pub struct AdministratorRepository {
    pool: Pool<Sqlite>,
}

impl AdministratorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new administrator (bootstrap seed path). The email column
    /// carries a unique index, so duplicates surface as a database error.
    pub async fn insert(&self, admin: &NewAdministrator) -> Result<Administrator, AppError> {
        let result = sqlx::query(
            "INSERT INTO administrators (email, password_hash, name) VALUES (?1, ?2, ?3)",
        )
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.name)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Administrator {
            id: result.last_insert_rowid(),
            email: admin.email.clone(),
            password_hash: admin.password_hash.clone(),
            name: admin.name.clone(),
        })
    }

    /// Exact-match lookup by email, for the login flow.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Administrator>, AppError> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            "SELECT id, email, password_hash, name FROM administrators WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Point lookup by id.
    pub async fn get(&self, id: i64) -> Result<Option<Administrator>, AppError> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            "SELECT id, email, password_hash, name FROM administrators WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Paginated scan in ascending id order, same contract as the vehicle
    /// listing: fixed page size, 1-indexed, `None` returns everything.
    pub async fn list(&self, page: Option<u32>) -> Result<Vec<Administrator>, AppError> {
        let (limit, offset) = page_bounds(page);

        let rows = sqlx::query_as::<_, AdministratorRow>(
            r#"
            SELECT id, email, password_hash, name
            FROM administrators
            ORDER BY id ASC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct AdministratorRow {
    id: i64,
    email: String,
    password_hash: String,
    name: String,
}

impl From<AdministratorRow> for Administrator {
    fn from(row: AdministratorRow) -> Self {
        Administrator {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            name: row.name,
        }
    }
}
