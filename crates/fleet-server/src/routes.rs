use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use fleet_core::error::AppError;
use fleet_core::models::NewVehicle;
use fleet_core::verify_password;

use crate::auth::require_bearer;
use crate::dto::{
    AdministratorListResponse, AdministratorResponse, HealthResponse, ListAdministratorsQuery,
    ListVehiclesQuery, LoginRequest, LoginResponse, VehicleListResponse, VehicleRequest,
    VehicleResponse,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles", post(create_vehicle))
        .route("/vehicles/{id}", get(get_vehicle))
        .route("/vehicles/{id}", put(update_vehicle))
        .route("/vehicles/{id}", delete(delete_vehicle))
        .route("/administrators", get(list_administrators))
        .route("/administrators/{id}", get(get_administrator))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    let public = Router::new()
        .route("/login", post(login))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed bearer token", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(admin) = state.db.admin_repo().find_by_email(&body.email).await? else {
        tracing::debug!("login rejected: unknown email");
        return Err(AppError::Unauthorized.into());
    };

    // bcrypt verification is CPU-bound; keep it off the async executor.
    let password_hash = admin.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&body.password, &password_hash))
        .await
        .map_err(|e| AppError::Token(format!("Password verification task failed: {e}")))??;

    if !valid {
        tracing::debug!("login rejected: wrong password for {}", admin.email);
        return Err(AppError::Unauthorized.into());
    }

    let token = state.tokens.issue(&admin.name, &admin.email)?;
    tracing::info!("Administrator {} logged in", admin.email);

    Ok(axum::Json(LoginResponse { token }))
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/vehicles",
    params(ListVehiclesQuery),
    responses(
        (status = 200, description = "Filtered, paginated vehicle list", body = VehicleListResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListVehiclesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicles = state
        .db
        .vehicle_repo()
        .list(query.page, query.model.as_deref(), query.make.as_deref())
        .await?;
    let total = vehicles.len();

    let response = VehicleListResponse {
        vehicles: vehicles.into_iter().map(VehicleResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    params(
        ("id" = i64, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "Vehicle details", body = VehicleResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    match state.db.vehicle_repo().get(id).await? {
        Some(vehicle) => Ok(axum::Json(VehicleResponse::from(vehicle))),
        None => Err(AppError::NotFound(format!("Vehicle not found: {id}")).into()),
    }
}

#[utoipa::path(
    post,
    path = "/vehicles",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = VehicleResponse),
        (status = 400, description = "Validation failed", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<VehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = NewVehicle::from(body);
    vehicle.validate()?;

    let stored = state.db.vehicle_repo().insert(&vehicle).await?;

    Ok((StatusCode::CREATED, axum::Json(VehicleResponse::from(stored))))
}

#[utoipa::path(
    put,
    path = "/vehicles/{id}",
    params(
        ("id" = i64, Path, description = "Vehicle ID")
    ),
    request_body = VehicleRequest,
    responses(
        (status = 204, description = "Vehicle updated"),
        (status = 400, description = "Validation failed", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    axum::Json(body): axum::Json<VehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = NewVehicle::from(body);
    vehicle.validate()?;

    if state.db.vehicle_repo().update(id, &vehicle).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Vehicle not found: {id}")).into())
    }
}

#[utoipa::path(
    delete,
    path = "/vehicles/{id}",
    params(
        ("id" = i64, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if state.db.vehicle_repo().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Vehicle not found: {id}")).into())
    }
}

// ---------------------------------------------------------------------------
// Administrators
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/administrators",
    params(ListAdministratorsQuery),
    responses(
        (status = 200, description = "Paginated administrator list", body = AdministratorListResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "administrators"
)]
pub async fn list_administrators(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAdministratorsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let administrators = state.db.admin_repo().list(query.page).await?;
    let total = administrators.len();

    let response = AdministratorListResponse {
        administrators: administrators
            .into_iter()
            .map(AdministratorResponse::from)
            .collect(),
        total,
    };

    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/administrators/{id}",
    params(
        ("id" = i64, Path, description = "Administrator ID")
    ),
    responses(
        (status = 200, description = "Administrator details", body = AdministratorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "administrators"
)]
pub async fn get_administrator(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    match state.db.admin_repo().get(id).await? {
        Some(admin) => Ok(axum::Json(AdministratorResponse::from(admin))),
        None => Err(AppError::NotFound(format!("Administrator not found: {id}")).into()),
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_status = match state.db.vehicle_repo().health_check().await {
        Ok(()) => "ok",
        Err(_) => "error",
    };

    let status = if db_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_status == "ok" {
            "healthy"
        } else {
            "unhealthy"
        },
        database: db_status,
    };

    (status, axum::Json(response))
}
