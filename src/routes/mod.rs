use actix_web::web;

use crate::services::llm::LlmClient;

pub mod chat;
pub mod components;
pub mod health;
pub mod theme;

/// Registers every endpoint. Handlers read their services from `web::Data`,
/// so the caller must provide `AppConfig`, `TravelAssistant<L>` and
/// `ThemeService<L>`.
pub fn configure<L: LlmClient + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api")
            .route("/tambo", web::post().to(chat::dispatch::<L>))
            .route("/destination-theme", web::post().to(theme::destination_theme::<L>))
            .service(
                web::scope("/components")
                    .route("", web::get().to(components::list::<L>))
                    .route("/render", web::post().to(components::render::<L>)),
            ),
    );
}
