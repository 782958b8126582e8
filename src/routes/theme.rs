use actix_web::{web, HttpResponse, Responder};

use crate::models::theme::{DestinationTheme, ThemeRequest};
use crate::services::llm::LlmClient;
use crate::services::theme_service::ThemeService;

/// POST /api/destination-theme
///
/// An unreadable body is treated like any other theming failure.
pub async fn destination_theme<L: LlmClient + 'static>(
    themes: web::Data<ThemeService<L>>,
    body: Option<web::Json<ThemeRequest>>,
) -> impl Responder {
    let theme = match body {
        Some(body) => themes.theme_for(body.destination.trim()).await,
        None => {
            log::error!("Theme request body could not be read");
            DestinationTheme::world()
        }
    };
    HttpResponse::Ok().json(theme)
}
