use serde::{Deserialize, Serialize};

use fleet_core::models::{Administrator, NewVehicle, Vehicle};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token, valid for the configured expiry window.
    pub token: String,
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct VehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl From<VehicleRequest> for NewVehicle {
    fn from(body: VehicleRequest) -> Self {
        NewVehicle {
            make: body.make,
            model: body.model,
            year: body.year,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VehicleResponse {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            make: v.make,
            model: v.model,
            year: v.year,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListVehiclesQuery {
    /// 1-indexed page of 10 records; omit for the full result set.
    pub page: Option<u32>,
    /// Case-insensitive substring match on the model field.
    pub model: Option<String>,
    /// Case-insensitive substring match on the make field.
    pub make: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VehicleListResponse {
    pub vehicles: Vec<VehicleResponse>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Administrators
// ---------------------------------------------------------------------------

/// Administrator view for API responses. The password hash never leaves
/// the store layer.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdministratorResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<Administrator> for AdministratorResponse {
    fn from(a: Administrator) -> Self {
        Self {
            id: a.id,
            email: a.email,
            name: a.name,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListAdministratorsQuery {
    /// 1-indexed page of 10 records; omit for the full result set.
    pub page: Option<u32>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdministratorListResponse {
    pub administrators: Vec<AdministratorResponse>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
