use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use exam_server::{app_state::AppState, config::Config, db::Database, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production().map_err(std::io::Error::other)?;
    }

    let db = Database::connect(&config)
        .await
        .map_err(std::io::Error::other)?;
    let state = AppState::new(db.clone(), config.clone())
        .await
        .map_err(std::io::Error::other)?;

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await?;

    db.shutdown().await;
    Ok(())
}
