use crate::comment::index::comment_routes;
use crate::post::post_index::post_routes;
use crate::user::index::user_routes;
use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(user_routes);
    cfg.configure(post_routes);
    cfg.configure(comment_routes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::service::CommentService;
    use crate::post::post_service::PostService;
    use crate::user::service::UserService;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use mongodb::Client;

    // Client handles are lazy: building the app does not touch the network,
    // so routes that fail before any query are testable without a database.
    macro_rules! test_app {
        () => {{
            let client = Client::with_uri_str("mongodb://localhost:27017")
                .await
                .unwrap();

            test::init_service(
                App::new()
                    .app_data(web::Data::new(UserService::new(&client)))
                    .app_data(web::Data::new(PostService::new(&client)))
                    .app_data(web::Data::new(CommentService::new(&client)))
                    .configure(routes),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn thread_request_without_post_id_is_bad_request() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/comments/post").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("Post ID is required")
        );
    }

    #[actix_web::test]
    async fn comment_creation_requires_bearer_token() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/comments")
            .set_json(serde_json::json!({
                "post_id": "64f000000000000000000001",
                "content": "hi"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn post_routes_require_bearer_token() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/posts/64f000000000000000000001")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
