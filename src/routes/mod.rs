pub mod auth;
pub mod tasks;

use actix_web::web;

use crate::{auth::AuthMiddleware, error::AppError, state::AppState};

/// Registers the shared services, the extractor error handlers and every route.
///
/// Everything under `/api/zadania` requires a bearer token; `/api/auth` is public.
pub fn config(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state.auth))
            .app_data(web::Data::new(state.tasks))
            .app_data(web::Data::new(state.keys.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid query string: {}", err)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid path: {}", err)).into()
            }))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .service(auth::login)
                            .service(auth::register),
                    )
                    .service(
                        web::scope("/zadania")
                            .wrap(AuthMiddleware::new(state.keys))
                            .service(tasks::get_tasks)
                            .service(tasks::create_task)
                            .service(tasks::get_task)
                            .service(tasks::update_task)
                            .service(tasks::delete_task),
                    ),
            );
    }
}
