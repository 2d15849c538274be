use crate::database::RedisService;
use crate::middleware::auth::{get_user_id_from_request, invalidate_session};
use crate::user::model::CreateUserRequest;
use crate::user::service::UserService;
use crate::utils::error::CustomError;
use crate::utils::model::LoginRequest;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

/// Register a new user
/// POST /auth/user/register
pub async fn register_user(
    user_service: web::Data<UserService>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, CustomError> {
    let user_info = body.into_inner();

    let user_id = user_service
        .create_user(user_info.username, user_info.email, user_info.password)
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "User created successfully",
        "httpStatusCode": 201,
        "user_id": user_id.to_hex()
    })))
}

/// Log in with username and password
/// POST /auth/user/login
pub async fn login_user(
    user_service: web::Data<UserService>,
    redis_service: Option<web::Data<RedisService>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, CustomError> {
    let token = user_service
        .login(body.into_inner(), redis_service.as_ref().map(|d| d.get_ref()))
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
        "httpStatusCode": 200,
        "token": token
    })))
}

/// Invalidate the caller's session
/// POST /auth/user/logout
pub async fn logout_user(
    req: HttpRequest,
    redis_service: Option<web::Data<RedisService>>,
) -> Result<HttpResponse, CustomError> {
    let user_id = get_user_id_from_request(&req)
        .ok_or_else(|| CustomError::UnauthorizedError("Not authenticated".to_string()))?;

    if let Some(redis) = redis_service {
        invalidate_session(&user_id, redis.get_ref()).await?;
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Logged out successfully",
        "httpStatusCode": 200
    })))
}
