use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fleet API",
        version = "0.1.0",
        description = "Vehicle registry with JWT-authenticated CRUD access."
    ),
    paths(
        crate::routes::login,
        crate::routes::list_vehicles,
        crate::routes::get_vehicle,
        crate::routes::create_vehicle,
        crate::routes::update_vehicle,
        crate::routes::delete_vehicle,
        crate::routes::list_administrators,
        crate::routes::get_administrator,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::LoginRequest,
        crate::dto::LoginResponse,
        crate::dto::VehicleRequest,
        crate::dto::VehicleResponse,
        crate::dto::VehicleListResponse,
        crate::dto::AdministratorResponse,
        crate::dto::AdministratorListResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Administrator login"),
        (name = "vehicles", description = "Vehicle record management"),
        (name = "administrators", description = "Administrator listing"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds Bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Bearer token obtained from POST /login."))
                        .build(),
                ),
            );
        }
    }
}
