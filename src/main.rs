use cleaning_service::config::AppConfig;
use cleaning_service::infrastructure::info_client::InfoClient;
use cleaning_service::{build_server, create_pool, run_migrations, AppState};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url)?;
    run_migrations(&pool)?;

    let info = InfoClient::new(
        config.ip_lookup_url.clone(),
        config.fact_url.clone(),
        config.http_timeout,
    )?;
    let state = AppState::new(pool, &config, info);

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await?;
    Ok(())
}
