use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use bc_api::{create_app, telemetry, AppState};
use bc_core::services::verification::{
    CodeRegistry, MessageTemplate, VerificationService, VerificationServiceConfig,
};
use bc_infra::{create_email_service, EmailService, EmailServiceAdapter};
use bc_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging_config())?;
    config.validate().context("invalid configuration")?;

    info!(environment = %config.environment, "Starting Bouncer API server");

    let template = config
        .authentication
        .load_template()
        .context("failed to load verification template")?;
    let template = MessageTemplate::new(template).context("invalid verification template")?;

    let transport: Arc<dyn EmailService> = Arc::from(
        create_email_service(&config.email).context("failed to initialize email service")?,
    );
    info!(provider = transport.provider_name(), "Email service ready");
    let email_service = Arc::new(EmailServiceAdapter::new(transport, config.email.sender.clone()));

    let registry = Arc::new(CodeRegistry::new(VerificationServiceConfig::from_authentication(
        &config.authentication,
    )));
    info!(
        domains = registry.config().role_associations.len(),
        timeout_secs = config.authentication.timeout,
        attempts = config.authentication.attempts,
        bandwidth = config.authentication.bandwidth,
        "Verification registry ready"
    );

    let verification_service = Arc::new(VerificationService::new(registry, email_service, template));
    let app_state = web::Data::new(AppState::new(verification_service));

    let bind_address = config.server.bind_address();
    info!(bind_address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Bouncer API server stopped");
    Ok(())
}
