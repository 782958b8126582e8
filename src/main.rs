use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travel_genie_api::config::AppConfig;
use travel_genie_api::routes;
use travel_genie_api::services::llm::groq::GroqClient;
use travel_genie_api::services::llm::retry::RetryPolicy;
use travel_genie_api::services::theme_service::{PhotoSearch, ThemeService};
use travel_genie_api::services::travel_assistant::TravelAssistant;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    log::info!("Attempting to bind to {}:{}", config.host, config.port);

    let llm = Arc::new(
        GroqClient::new(&config.llm)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );
    log::info!("Using model {}", llm.model());

    let assistant = web::Data::new(TravelAssistant::from_config(llm.clone(), &config));
    let photos = PhotoSearch::new(&config.photos)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let themes = web::Data::new(ThemeService::new(
        llm,
        RetryPolicy::from(&config.llm),
        photos,
    ));
    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(config.clone())
            .app_data(assistant.clone())
            .app_data(themes.clone())
            .configure(routes::configure::<GroqClient>)
    })
    .bind(bind)?
    .run()
    .await
}
