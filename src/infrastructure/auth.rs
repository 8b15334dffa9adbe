//! Session tokens
//!
//! A login issues a signed JWT that carries the whole principal. Requests
//! present it as a bearer token and get the principal back without another
//! store lookup.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::env;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::api::ApiError;
use crate::domain::{DomainError, Principal, Role};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub name: String,
    pub role: Role,
    pub member_id: Option<i32>,
    pub staff_id: Option<i32>,
    pub exp: usize,
}

impl Claims {
    pub fn into_principal(self) -> Result<Principal, String> {
        let user_id = self
            .sub
            .parse::<i32>()
            .map_err(|_| format!("Invalid subject '{}'", self.sub))?;

        Ok(Principal {
            user_id,
            name: self.name,
            role: self.role,
            member_id: self.member_id,
            staff_id: self.staff_id,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(ApiError(DomainError::Unauthenticated))?;

        decode_jwt(token)
            .and_then(Claims::into_principal)
            .map_err(|e| {
                tracing::debug!("Rejected session token: {}", e);
                ApiError(DomainError::Unauthenticated)
            })
    }
}

fn get_jwt_secret() -> Result<String, String> {
    match env::var("JWT_SECRET") {
        Ok(secret) => Ok(secret),
        Err(_) if cfg!(debug_assertions) => Ok("secret".to_string()),
        Err(_) => Err("JWT_SECRET environment variable must be set in production".to_string()),
    }
}

pub fn create_jwt(principal: &Principal, ttl_hours: i64) -> Result<String, String> {
    let secret = get_jwt_secret()?;
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| "Session lifetime out of range".to_string())?
        .timestamp();

    let claims = Claims {
        sub: principal.user_id.to_string(),
        name: principal.name.clone(),
        role: principal.role,
        member_id: principal.member_id,
        staff_id: principal.staff_id,
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| e.to_string())
}

pub fn decode_jwt(token: &str) -> Result<Claims, String> {
    let secret = get_jwt_secret()?;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
