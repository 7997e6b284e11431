use fleet_core::error::AppError;
use fleet_core::models::{NewVehicle, Vehicle};
use sqlx::{Pool, Sqlite, SqlitePool};

/// Fixed number of records per page for all paginated scans.
pub const PAGE_SIZE: i64 = 10;

/// Resolve an optional 1-indexed page into LIMIT/OFFSET values.
///
/// `None` means the full result set (SQLite treats a negative LIMIT as
/// unbounded). Pages below 1 are clamped to the first page.
pub(crate) fn page_bounds(page: Option<u32>) -> (i64, i64) {
    match page {
        Some(page) => (PAGE_SIZE, (i64::from(page.max(1)) - 1) * PAGE_SIZE),
        None => (-1, 0),
    }
}

/// Repository for vehicle persistence in SQLite.
#[derive(Clone)]
pub struct VehicleRepository {
    pool: Pool<Sqlite>,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new vehicle. Returns the stored record with its assigned id.
    pub async fn insert(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        let result = sqlx::query("INSERT INTO vehicles (make, model, year) VALUES (?1, ?2, ?3)")
            .bind(&vehicle.make)
            .bind(&vehicle.model)
            .bind(vehicle.year)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Vehicle {
            id: result.last_insert_rowid(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
        })
    }

    /// Point lookup by id.
    pub async fn get(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            "SELECT id, make, model, year FROM vehicles WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Replace make/model/year in place, id unchanged. Returns false when
    /// no record with this id exists (and nothing was mutated).
    pub async fn update(&self, id: i64, vehicle: &NewVehicle) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE vehicles SET make = ?1, model = ?2, year = ?3 WHERE id = ?4")
                .bind(&vehicle.make)
                .bind(&vehicle.model)
                .bind(vehicle.year)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a vehicle by id. Returns false when the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Filtered, paginated scan in ascending id order.
    ///
    /// `model` and `make` are case-insensitive substring filters. Page size
    /// is fixed at [`PAGE_SIZE`]; `page` is 1-indexed and `None` returns the
    /// full filtered set.
    pub async fn list(
        &self,
        page: Option<u32>,
        model: Option<&str>,
        make: Option<&str>,
    ) -> Result<Vec<Vehicle>, AppError> {
        let (limit, offset) = page_bounds(page);

        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, make, model, year
            FROM vehicles
            WHERE (?1 IS NULL OR instr(lower(model), lower(?1)) > 0)
              AND (?2 IS NULL OR instr(lower(make), lower(?2)) > 0)
            ORDER BY id ASC
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(model)
        .bind(make)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    make: String,
    model: String,
    year: i32,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: row.id,
            make: row.make,
            model: row.model,
            year: row.year,
        }
    }
}
