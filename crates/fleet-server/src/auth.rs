use std::sync::Arc;

use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::dto::ErrorResponse;
use crate::state::AppState;

/// Middleware that validates `Authorization: Bearer <token>` through the
/// configured [`fleet_core::TokenService`].
///
/// A missing header, malformed token, bad signature, wrong issuer, and an
/// expired token all produce the same 401 response so callers learn nothing
/// about why they were rejected.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let claims = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .and_then(|token| state.tokens.validate(token).ok());

    match claims {
        Some(claims) => {
            tracing::debug!(subject = %claims.sub, "authenticated request");
            next.run(request).await
        }
        None => {
            let body = ErrorResponse {
                error: "unauthorized".to_string(),
                message: "Missing or invalid bearer token".to_string(),
            };
            (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
        }
    }
}
