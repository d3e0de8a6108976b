use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::user::{Role, User};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

pub fn create_token(user: &User, config: &Config) -> AppResult<String> {
    create_token_at(user, config, Utc::now())
}

/// Signs an HS256 token issued at `issued_at` and valid for `jwt_ttl_secs`.
pub fn create_token_at(user: &User, config: &Config, issued_at: DateTime<Utc>) -> AppResult<String> {
    let claims = Claims {
        user_id: user.id,
        username: user.username.clone(),
        role: user.role,
        exp: (issued_at + Duration::seconds(config.jwt_ttl_secs)).timestamp(),
        iat: issued_at.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // Expiry is exact; no clock-skew allowance past the TTL.
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}
