//! HTTP handlers and route configuration.

mod health;
mod posts;
mod shell;

use actix_web::web;

use crate::middleware::error::json_error_handler;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/posts", web::get().to(posts::list_posts))
                .route("/posts", web::post().to(posts::create_post))
                .route("/posts/{id}", web::get().to(posts::get_post))
                .route("/posts/{id}", web::put().to(posts::update_post))
                .route("/posts/{id}", web::delete().to(posts::delete_post))
                .default_service(web::to(posts::api_not_found)),
        )
        .default_service(web::to(shell::spa_shell));
}
