// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/calcul_prime", web::post().to(handlers::calcul_prime))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(handlers::health_check))
        )
        .route("/", web::get().to(handlers::index_page))
        .route("/simulateur", web::get().to(handlers::simulateur_page))
        .route("/{path:.*}", web::get().to(handlers::static_file));
}
