//! Gateway entry point: config, tracing, pool, HTTP server.

use actix_web::{web, App, HttpServer};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ci_gateway::config::GatewayConfig;
use ci_gateway::handlers::not_found;
use ci_gateway::middleware::RequestLogger;
use ci_gateway::repository::NodeRepository;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter.clone()))
        .init();

    let pool = SqlitePool::connect(&config.database_url).await?;
    let repo = NodeRepository::new(pool);
    repo.init_schema().await?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.jenkins_timeout_secs))
        .build()?;

    let bind_addr = config.bind_addr();
    info!(%bind_addr, "starting ci-gateway");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(http.clone()))
            .wrap(RequestLogger)
            .configure(ci_gateway::configure_routes)
            .default_service(web::route().to(not_found))
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
