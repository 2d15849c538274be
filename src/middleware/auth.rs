use std::env;

use crate::database::RedisService;
use crate::utils::error::CustomError;
use actix_web::{Error, HttpMessage, dev::ServiceRequest, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const SESSION_TTL_SECONDS: u64 = 86400;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub exp: usize,
}

fn jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string())
}

fn expiry_timestamp() -> Result<usize, CustomError> {
    chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(24))
        .map(|t| t.timestamp() as usize)
        .ok_or_else(|| CustomError::InternalServerError("Clock overflow".to_string()))
}

/// Verify a bearer JWT and, when Redis is around, the session it belongs to.
pub async fn verify_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let token = credentials.token();

    let token_data = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => data,
        Err(_) => return Err((actix_web::error::ErrorUnauthorized("Invalid token"), req)),
    };

    let user_id = token_data.claims.id.clone();

    // Without Redis we fall back to plain JWT validation
    let redis_service = match req.app_data::<web::Data<RedisService>>() {
        Some(service) => service.clone(),
        None => {
            req.extensions_mut().insert(token_data.claims);
            return Ok(req);
        }
    };

    match redis_service.validate_session(token).await {
        Ok(Some(stored_user_id)) => {
            if stored_user_id == user_id {
                req.extensions_mut().insert(token_data.claims);
                Ok(req)
            } else {
                Err((actix_web::error::ErrorUnauthorized("Session mismatch"), req))
            }
        }
        // Token absent from Redis: session expired or user logged out
        Ok(None) => Err((
            actix_web::error::ErrorUnauthorized("Session expired or invalid"),
            req,
        )),
        // Redis unreachable: fall back to JWT-only validation
        Err(_) => {
            req.extensions_mut().insert(token_data.claims);
            Ok(req)
        }
    }
}

/// Create a JWT token and store the session in Redis
pub async fn create_token_with_session(
    user_id: &str,
    redis_service: &RedisService,
) -> Result<String, CustomError> {
    let token = create_token(user_id).await?;

    redis_service
        .store_session(user_id, &token, SESSION_TTL_SECONDS)
        .await
        .map_err(|e| CustomError::InternalServerError(format!("Failed to store session: {}", e)))?;

    Ok(token)
}

/// Create a JWT token without a Redis session
pub async fn create_token(user_id: &str) -> Result<String, CustomError> {
    let claims = Claims {
        id: user_id.to_owned(),
        exp: expiry_timestamp()?,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
    .map_err(|_| CustomError::InternalServerError("Token generation failed".to_string()))
}

/// Invalidate a user's session (logout)
pub async fn invalidate_session(
    user_id: &str,
    redis_service: &RedisService,
) -> Result<(), CustomError> {
    redis_service.invalidate_session(user_id).await.map_err(|e| {
        CustomError::InternalServerError(format!("Failed to invalidate session: {}", e))
    })
}

/// Get user ID from request extensions (use after auth middleware)
pub fn get_user_id_from_request(req: &actix_web::HttpRequest) -> Option<String> {
    req.extensions()
        .get::<Claims>()
        .map(|claims| claims.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn token_roundtrip_preserves_user_id() {
        // Default secret is used when JWT_SECRET is unset
        let token = create_token("64f000000000000000000001").await.unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(jwt_secret().as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.id, "64f000000000000000000001");
        assert!(data.claims.exp > chrono::Utc::now().timestamp() as usize);
    }

    #[actix_web::test]
    async fn tampered_token_is_rejected() {
        let token = create_token("64f000000000000000000001").await.unwrap();
        let mut tampered = token.clone();
        tampered.pop();

        let result = decode::<Claims>(
            &tampered,
            &DecodingKey::from_secret(jwt_secret().as_bytes()),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
