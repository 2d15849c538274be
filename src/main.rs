use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger, NormalizePath};
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};

mod comment;
mod database;
mod middleware;
mod post;
mod router;
mod user;
mod utils;

use comment::service::CommentService;
use middleware::error_handler::handle_error;
use middleware::not_found::not_found;
use post::post_service::PostService;
use router::index::routes;
use serde_json::json;
use user::service::UserService;

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Welcome to the Inkwell API",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": std::env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string()),
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mongo_client = database::connect_to_mongo()
        .await
        .expect("Failed to connect to MongoDB");

    // Sessions degrade to JWT-only validation when Redis is unavailable
    let redis_service = match database::connect_to_redis().await {
        Ok(client) => Some(database::RedisService::new(&client)),
        Err(e) => {
            warn!("Redis unavailable, running without sessions: {}", e);
            None
        }
    };

    let user_service = web::Data::new(UserService::new(&mongo_client));
    let post_service = web::Data::new(PostService::new(&mongo_client));
    let comment_service = web::Data::new(CommentService::new(&mongo_client));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    info!("Starting server on http://localhost:{}", port);

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .app_data(user_service.clone())
            .app_data(post_service.clone())
            .app_data(comment_service.clone())
            .configure(routes)
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::NOT_FOUND, not_found)
                    .default_handler(handle_error),
            )
            .service(default);

        if let Some(redis) = &redis_service {
            app = app.app_data(web::Data::new(redis.clone()));
        }

        app
    })
    .bind(("localhost", port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
