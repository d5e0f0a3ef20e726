use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use serde_json::json;

use grooming_service::config::ServerConfig;
use grooming_service::db::{establish_connection_pool_with, run_migrations};
use grooming_service::events::{
    EventFactory, EventPublisher, EventSink, LogEventSink, NoopEventSink, SERVICE_SHUTDOWN,
    SERVICE_STARTUP,
};
use grooming_service::repository::DieselRepository;
use grooming_service::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(server_config.log_level()),
    )
    .init();

    let pool = match establish_connection_pool_with(
        &server_config.database_url,
        server_config.connection_options(),
    ) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match pool.get() {
        Ok(mut conn) => {
            if let Err(e) = run_migrations(&mut conn) {
                log::error!("Failed to run database migrations: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            log::error!("Failed to get database connection: {e}");
            std::process::exit(1);
        }
    }

    let sink: Arc<dyn EventSink> = if server_config.unified_logs_enabled {
        Arc::new(LogEventSink)
    } else {
        Arc::new(NoopEventSink)
    };
    let events = EventPublisher::new(
        sink,
        EventFactory::new(&server_config.app_name, &server_config.app_version),
    );

    let address = server_config.address.clone();
    let port = server_config.port;
    let prefix = server_config.api_v1_prefix.clone();

    let repo = web::Data::new(DieselRepository::new(pool));
    let publisher = web::Data::new(events.clone());
    let config_data = web::Data::new(server_config);

    log::info!("Starting {} on {address}:{port}", config_data.app_name);
    events.info(
        SERVICE_STARTUP,
        "Service starting",
        json!({ "address": address, "port": port }),
    );

    let result = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(publisher.clone())
            .app_data(config_data.clone())
            .service(web::scope(&prefix).configure(routes::configure))
    })
    .bind((address.as_str(), port))?
    .run()
    .await;

    log::info!("Shutting down");
    events.info(SERVICE_SHUTDOWN, "Service stopped", json!({}));
    result
}
