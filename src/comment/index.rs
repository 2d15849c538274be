use super::controller::{
    create_comment, delete_comment, get_comment, get_comment_count, get_post_comments,
    missing_post_id, update_comment,
};
use crate::middleware::auth::verify_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            // Thread reads are public; the bare `/post` route covers requests
            // that lack the post identifier
            .route("/post", web::get().to(missing_post_id))
            .route("/post/{post_id}", web::get().to(get_post_comments))
            .route("/count/{post_id}", web::get().to(get_comment_count))
            .service(
                web::resource("")
                    .wrap(HttpAuthentication::bearer(verify_token))
                    .route(web::post().to(create_comment)),
            )
            .service(
                web::resource("/{comment_id}")
                    .wrap(HttpAuthentication::bearer(verify_token))
                    .route(web::get().to(get_comment))
                    .route(web::put().to(update_comment))
                    .route(web::delete().to(delete_comment)),
            ),
    );
}
