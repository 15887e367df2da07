use std::collections::HashMap;
use std::io;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use workout_tracker::config::AppConfig;
use workout_tracker::db::WorkoutStore;
use workout_tracker::routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let store = WorkoutStore::connect(&config.database_url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "workout_tracker".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let bind_address = config.bind_address.clone();
    info!("Starting server at {}", bind_address);

    let store = web::Data::new(store);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(prometheus.clone())
            .app_data(store.clone())
            .app_data(config.clone())
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
