use actix_web::{App, HttpServer};
use clap::Parser;
use people_assign::build_info::build_info;
use people_assign::config::Config;
use people_assign::metrics::init_prometheus;
use people_assign::middleware::TracingMiddleware;
use people_assign::state::ResolverState;
use std::sync::Arc;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::parse();

    if config.version {
        println!("people-assign version: {}", build_info().version);
        return Ok(());
    }

    let resolver_config = config.resolver_config().map_err(|e| {
        error!(message = "Invalid configuration", error = %e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    let state = Arc::new(ResolverState::new(resolver_config).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?);

    let registry = init_prometheus().map_err(std::io::Error::other)?;

    info!(
        message = "Initializing server",
        version = build_info().version,
        host = config.host,
        port = config.port,
        administrator = state.resolver.config().administrator,
        separator = %state.resolver.config().separator
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(TracingMiddleware::new())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url(
                "/api-docs/openapi.json",
                people_assign::handlers::ApiDoc::openapi(),
            ))
            .app_data(actix_web::web::Data::new(state.clone()))
            .app_data(actix_web::web::Data::new(registry.clone()))
            .configure(people_assign::handlers::init)
    })
    .bind((config.host.as_str(), config.port))?
    .workers(config.workers)
    .run()
    .await
}
