pub mod admin_repository;
pub mod config;
pub mod database;
pub mod vehicle_repository;

pub use admin_repository::AdministratorRepository;
pub use config::DatabaseConfig;
pub use database::Database;
pub use vehicle_repository::{PAGE_SIZE, VehicleRepository};
