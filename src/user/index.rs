use super::controller::{login_user, logout_user, register_user};
use crate::middleware::auth::verify_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth/user")
            .route("/register", web::post().to(register_user))
            .route("/login", web::post().to(login_user))
            .service(
                web::resource("/logout")
                    .wrap(HttpAuthentication::bearer(verify_token))
                    .route(web::post().to(logout_user)),
            ),
    );
}
