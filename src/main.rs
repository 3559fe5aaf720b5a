use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use simulateur::api::{configure_routes, AppState};
use simulateur::{banner, config, database};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = config::ServerConfig::from_env().map_err(std::io::Error::other)?;
    let db_pool = database::init_db(&server_config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    let bind = (server_config.host.clone(), server_config.port);
    let state = AppState::new(db_pool);

    log::info!("🚀 Simulateur available at http://{}:{}/simulateur", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
