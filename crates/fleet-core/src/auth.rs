use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The single role this system recognizes.
pub const ROLE_ADMINISTRATOR: &str = "Administrator";

/// Signing configuration for token issuance and validation.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub issuer: String,
    pub expiry_hours: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            expiry_hours: 1,
        }
    }

    /// Read configuration from environment variables.
    ///
    /// - `JWT_SECRET` (required)
    /// - `JWT_ISSUER` (required)
    /// - `TOKEN_EXPIRY_HOURS` (optional, defaults to 1)
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| AppError::Config("JWT_SECRET not set. Required for token signing.".into()))?;
        let issuer = std::env::var("JWT_ISSUER")
            .map_err(|_| AppError::Config("JWT_ISSUER not set. Required for token issuance.".into()))?;

        let expiry_hours = match std::env::var("TOKEN_EXPIRY_HOURS") {
            Err(_) => 1,
            Ok(raw) => {
                let parsed: i64 = raw.parse().map_err(|_| {
                    AppError::Config(format!(
                        "Invalid TOKEN_EXPIRY_HOURS '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed < 1 {
                    return Err(AppError::Config(
                        "TOKEN_EXPIRY_HOURS must be at least 1".into(),
                    ));
                }
                parsed
            }
        };

        Ok(Self {
            secret,
            issuer,
            expiry_hours,
        })
    }
}

/// Claims carried inside an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the administrator's display name.
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    /// Expiry as a unix timestamp (issue time + configured expiry).
    pub exp: i64,
}

/// Issues and validates HS256 bearer tokens.
///
/// Stateless: validity is fully recomputable from the token bytes plus the
/// signing key and clock. There is no revocation list.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expiry_hours: i64,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            expiry_hours: config.expiry_hours,
        }
    }

    /// Issue a signed token for a successfully authenticated administrator.
    pub fn issue(&self, name: &str, email: &str) -> Result<String, AppError> {
        self.issue_at(Utc::now(), name, email)
    }

    fn issue_at(&self, now: DateTime<Utc>, name: &str, email: &str) -> Result<String, AppError> {
        let claims = Claims {
            sub: name.to_string(),
            email: email.to_string(),
            role: ROLE_ADMINISTRATOR.to_string(),
            iss: self.issuer.clone(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Token(e.to_string()))
    }

    /// Validate signature, issuer, and expiry. Audience is deliberately
    /// not checked. Every failure collapses to `Unauthorized` so the
    /// caller leaks nothing about why a token was rejected.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("token rejected: {e}");
                AppError::Unauthorized
            })
    }
}

/// Hash a password for storage with bcrypt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| AppError::Token(e.to_string()))
}

/// Check a candidate password against a stored bcrypt hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, password_hash).map_err(|e| AppError::Token(e.to_string()))
}
