use fleet_core::TokenService;
use fleet_db::Database;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    /// Issues tokens at login and validates them in the bearer middleware.
    pub tokens: TokenService,
}
