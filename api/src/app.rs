//! Application state and factory
//!
//! This module holds the shared state handed to every handler and builds the
//! Actix-web application with all routes registered from the command table.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use bc_core::services::verification::{EmailServiceTrait, VerificationService};
use bc_shared::ApiResponse;

use crate::commands::{API_PREFIX, COMMANDS};
use crate::handlers::error::json_error_handler;
use crate::routes;

/// Application state that holds shared services
pub struct AppState<E: EmailServiceTrait> {
    pub verification_service: Arc<VerificationService<E>>,
}

impl<E: EmailServiceTrait> AppState<E> {
    pub fn new(verification_service: Arc<VerificationService<E>>) -> Self {
        Self { verification_service }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<E>(
    app_state: web::Data<AppState<E>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    E: EmailServiceTrait + 'static,
{
    let api = COMMANDS.iter().fold(
        web::scope(API_PREFIX).route("/commands", web::get().to(routes::commands::list_commands)),
        |scope, command| scope.route(command.path, command.route::<E>()),
    );

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(routes::health::health_check::<E>))
        .service(api)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
