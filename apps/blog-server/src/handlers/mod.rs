//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod views;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Accounts
        .service(
            web::scope("/accounts")
                .route("/register/", web::post().to(auth::register))
                .route("/login/", web::post().to(auth::login))
                .route("/me/", web::get().to(auth::me)),
        )
        // Posts; `/post/new/` must be registered before `/post/{id}/`
        .route("/", web::get().to(posts::post_list))
        .service(
            web::resource("/post/new/")
                .route(web::get().to(posts::new_post_form))
                .route(web::post().to(posts::post_new)),
        )
        .route("/post/{id}/", web::get().to(posts::post_detail))
        .service(
            web::resource("/post/{id}/edit/")
                .route(web::get().to(posts::edit_post_form))
                .route(web::post().to(posts::post_edit)),
        )
        .route("/category/{id}/", web::get().to(posts::list_category))
        .route("/mypost/", web::get().to(posts::my_posts))
        // Comments
        .route(
            "/post/{id}/comment/",
            web::post().to(comments::add_comment_to_post),
        )
        .service(
            web::resource("/comment/{id}/approve/")
                .route(web::get().to(comments::comment_approve))
                .route(web::post().to(comments::comment_approve)),
        )
        .service(
            web::resource("/comment/{id}/remove/")
                .route(web::get().to(comments::comment_remove))
                .route(web::post().to(comments::comment_remove)),
        );
}
