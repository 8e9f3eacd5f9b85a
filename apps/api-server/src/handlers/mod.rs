//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod contact;
mod health;
mod services;
pub mod uploads;

use actix_web::{HttpResponse, web};

use cms_shared::ErrorResponse;

use crate::middleware::RateLimit;

/// Configure all application routes.
///
/// Static segments (`/count`, `/upload`) are registered ahead of the
/// parameterised ones so they are never captured as an id or slug.
/// `contact_limit` wraps the whole contact scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig, contact_limit: RateLimit) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/blogs")
                    .service(
                        web::resource("")
                            .route(web::get().to(blogs::list))
                            .route(web::post().to(blogs::create)),
                    )
                    .service(web::resource("/count").route(web::get().to(blogs::count)))
                    .service(web::resource("/upload").route(web::post().to(blogs::upload)))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(blogs::get))
                            .route(web::put().to(blogs::update))
                            .route(web::delete().to(blogs::delete)),
                    ),
            )
            .service(
                web::scope("/services")
                    .service(
                        web::resource("")
                            .route(web::get().to(services::list))
                            .route(web::post().to(services::create)),
                    )
                    .service(web::resource("/count").route(web::get().to(services::count)))
                    .service(web::resource("/upload").route(web::post().to(services::upload)))
                    .service(
                        web::resource("/{slug}")
                            .route(web::get().to(services::get))
                            .route(web::put().to(services::update))
                            .route(web::delete().to(services::delete)),
                    ),
            )
            .service(
                web::scope("/contact")
                    .wrap(contact_limit)
                    .service(
                        web::resource("")
                            .route(web::post().to(contact::submit))
                            .route(web::get().to(contact::list)),
                    )
                    .service(web::resource("/count").route(web::get().to(contact::count)))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(contact::get))
                            .route(web::patch().to(contact::update))
                            .route(web::delete().to(contact::delete)),
                    ),
            ),
    );
}

/// Fallback for every unmatched path.
pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::route_not_found())
}
