use actix_web::{error, web, HttpRequest};
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::errors::AppError;
use crate::handlers;

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Registers every `/v1` endpoint. Expects `web::Data<WorkoutStore>` and
/// `web::Data<AppConfig>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let auth = HttpAuthentication::with_fn(crate::utils::jwt::validator);

    // Extractor rejections use the same `{"error": ...}` body as handlers.
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));

    cfg.service(
        web::resource("/v1/register")
            .route(web::post().to(handlers::auth::register)),
    )
    .service(
        web::resource("/v1/login")
            .route(web::post().to(handlers::auth::login)),
    )
    .service(
        web::resource("/v1/user")
            .wrap(auth.clone())
            .route(web::get().to(handlers::profile::get_profile)),
    )
    .service(
        web::resource("/v1/workout")
            .wrap(auth.clone())
            .route(web::get().to(handlers::workout::get_workouts))
            .route(web::post().to(handlers::workout::create_workout)),
    )
    // Before `{workoutId}` so "export" is not taken for an id.
    .service(
        web::resource("/v1/workout/export")
            .wrap(auth.clone())
            .route(web::get().to(handlers::workout::export_workouts)),
    )
    .service(
        web::resource("/v1/workout/{workoutId}")
            .wrap(auth.clone())
            .route(web::patch().to(handlers::workout::update_workout))
            .route(web::delete().to(handlers::workout::delete_workout)),
    )
    .service(
        web::scope("/v1/stats")
            .wrap(auth)
            .route("/streak", web::get().to(handlers::stats::get_streak))
            .route("/achievements", web::get().to(handlers::stats::get_achievements))
            .route("/progress", web::get().to(handlers::stats::get_progress))
            .route("/durations", web::get().to(handlers::stats::get_durations)),
    );
}
