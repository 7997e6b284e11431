pub mod auth;
pub mod error;
pub mod models;

pub use auth::{Claims, TokenConfig, TokenService, hash_password, verify_password};
pub use error::AppError;
pub use models::{Administrator, NewAdministrator, NewVehicle, Vehicle};
