use std::io;

use accident_tracker::{
    config::Config, database, middleware::RequestIdMiddlewareFactory, routes,
};
use actix_cors::Cors;
use actix_web::{
    middleware::{Logger, NormalizePath, TrailingSlash},
    App, HttpServer,
};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config: Config =
        Config::from_env().map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    let db = database::connect(&config)
        .await
        .map_err(|error| io::Error::new(io::ErrorKind::Other, error))?;
    let state = routes::AppState::new(&db, config.password_cost);

    info!(host = %config.host, port = config.port, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(RequestIdMiddlewareFactory)
            .wrap(Cors::permissive())
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .configure(|cfg| routes::configure(cfg, &state))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
