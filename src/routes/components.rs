use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::Value;

use crate::services::llm::LlmClient;
use crate::services::travel_assistant::TravelAssistant;

#[derive(Debug, Deserialize)]
pub struct RenderBody {
    pub name: String,
    #[serde(default)]
    pub props: Value,
}

/// GET /api/components
pub async fn list<L: LlmClient + 'static>(
    assistant: web::Data<TravelAssistant<L>>,
) -> impl Responder {
    HttpResponse::Ok().json(assistant.registry().entries())
}

/// POST /api/components/render
///
/// Always 200; failures come back as a placeholder payload.
pub async fn render<L: LlmClient + 'static>(
    assistant: web::Data<TravelAssistant<L>>,
    body: web::Json<RenderBody>,
) -> impl Responder {
    let body = body.into_inner();
    let props = if body.props.is_null() {
        Value::Object(Default::default())
    } else {
        body.props
    };

    HttpResponse::Ok().json(assistant.renderer().render(&body.name, &props))
}
