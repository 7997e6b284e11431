use crate::error::AppError;

/// Maximum length for vehicle make/model fields, matching the column width.
pub const MAX_NAME_LEN: usize = 150;

/// A vehicle record as stored, with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Vehicle {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// DTO for inserting or replacing a vehicle. The id is always assigned
/// (insert) or preserved (update) by the store, never supplied here.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl NewVehicle {
    /// Check required fields and length caps before any store call.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.make.trim().is_empty() {
            return Err(AppError::Validation("make is required".into()));
        }
        if self.make.len() > MAX_NAME_LEN {
            return Err(AppError::Validation(format!(
                "make exceeds {MAX_NAME_LEN} characters"
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AppError::Validation("model is required".into()));
        }
        if self.model.len() > MAX_NAME_LEN {
            return Err(AppError::Validation(format!(
                "model exceeds {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// An administrator account. The password is stored only as a bcrypt hash.
#[derive(Debug, Clone)]
pub struct Administrator {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// DTO for inserting a new administrator (bootstrap seed path).
#[derive(Debug, Clone)]
pub struct NewAdministrator {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}
