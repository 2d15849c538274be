use crate::middleware::auth::Claims;
use crate::post::post_model::{CreatePostRequest, Post, UpdatePostRequest};
use crate::post::post_service::PostService;
use crate::utils::error::CustomError;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use mongodb::bson::oid::ObjectId;
use serde_json::json;

fn author_id_from_request(req: &HttpRequest) -> Result<ObjectId, CustomError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or_else(|| CustomError::UnauthorizedError("Not authenticated".into()))?;

    ObjectId::parse_str(&claims.id)
        .map_err(|_| CustomError::BadRequestError("Invalid user id in token".into()))
}

fn parse_post_id(raw: String) -> Result<ObjectId, CustomError> {
    ObjectId::parse_str(raw).map_err(|_| CustomError::BadRequestError("Invalid post ID".into()))
}

/// Create a new post, author taken from the bearer token
/// POST /posts
pub async fn create_post(
    post_service: web::Data<PostService>,
    body: web::Json<CreatePostRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, CustomError> {
    let author_id = author_id_from_request(&req)?;

    if body.title.trim().is_empty() || body.content.trim().is_empty() {
        return Err(CustomError::ValidationError(
            "Post title and content cannot be empty".into(),
        ));
    }

    let new_post = Post {
        id: ObjectId::new(),
        title: body.title.clone(),
        content: body.content.clone(),
        author_id,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };

    let inserted_post = post_service.create_post(new_post).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Post created successfully",
        "httpStatusCode": 201,
        "post": inserted_post
    })))
}

/// Fetch a single post
/// GET /posts/{id}
pub async fn get_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post_id = parse_post_id(post_id.into_inner())?;
    let post = post_service.get_post(&post_id).await?;

    match post {
        Some(p) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Post fetched successfully",
            "httpStatusCode": 200,
            "post": p
        }))),
        None => Err(CustomError::NotFoundError("Post not found".into())),
    }
}

/// Partially update a post's title and/or content
/// PUT /posts/{id}
pub async fn update_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    body: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, CustomError> {
    let post_id = parse_post_id(post_id.into_inner())?;
    let update = body.into_inner();

    if update.title.is_none() && update.content.is_none() {
        return Err(CustomError::ValidationError(
            "Nothing to update: provide a title or content".into(),
        ));
    }

    let updated = post_service
        .update_post(&post_id, update.title, update.content)
        .await?;

    match updated {
        Some(_) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Post updated successfully",
            "httpStatusCode": 200
        }))),
        None => Err(CustomError::NotFoundError("Post not found".into())),
    }
}

/// Delete a post
/// DELETE /posts/{id}
pub async fn delete_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post_id = parse_post_id(post_id.into_inner())?;
    let deleted = post_service.delete_post(&post_id).await?;

    if deleted {
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Post deleted successfully",
            "httpStatusCode": 200
        })))
    } else {
        Err(CustomError::NotFoundError("Post not found".into()))
    }
}
