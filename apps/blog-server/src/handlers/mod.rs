//! HTTP handlers and route configuration.

mod posts;

#[cfg(feature = "dev-seeds")]
mod seeds;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::index))
        .route("/posts", web::post().to(posts::create))
        // Before "/posts/{id}" so "new" is not taken for an id.
        .route("/posts/new", web::get().to(posts::new_form))
        .service(
            web::resource("/posts/{id}")
                .route(web::get().to(posts::show))
                .route(web::put().to(posts::update))
                .route(web::delete().to(posts::delete)),
        )
        .route("/posts/{id}/edit", web::get().to(posts::edit_form));

    #[cfg(feature = "dev-seeds")]
    cfg.route("/seeds", web::get().to(seeds::seed));
}
