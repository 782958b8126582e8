use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::models::route_decision::{RegistryEntry, RouteDecision};
use crate::models::trip::TripDetails;
use crate::services::dispatch_service::{TurnFailure, UPSTREAM_ERROR_MESSAGE};
use crate::services::llm::LlmClient;
use crate::services::travel_assistant::{TravelAssistant, TurnInput};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchBody {
    pub message: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub registry: Option<Vec<RegistryEntry>>,
    #[serde(default)]
    pub trip_details: Option<TripDetails>,
}

/// POST /api/tambo
///
/// A body that does not parse is answered like any other failed turn: 500
/// with the apology and no components.
pub async fn dispatch<L: LlmClient + 'static>(
    assistant: web::Data<TravelAssistant<L>>,
    payload: web::Bytes,
) -> impl Responder {
    let body: DispatchBody = match serde_json::from_slice(&payload) {
        Ok(body) => body,
        Err(e) => {
            log::error!("Invalid dispatch request: {}", e);
            return HttpResponse::InternalServerError()
                .json(RouteDecision::conversational(UPSTREAM_ERROR_MESSAGE));
        }
    };

    let outcome = assistant
        .run_turn(TurnInput {
            message: &body.message,
            context: &body.context,
            registry: body.registry.as_deref(),
            trip: body.trip_details.as_ref(),
        })
        .await;

    match outcome.failure {
        None => HttpResponse::Ok().json(outcome.decision),
        Some(TurnFailure::RateLimited) => HttpResponse::TooManyRequests().json(outcome.decision),
        Some(TurnFailure::Upstream) => HttpResponse::InternalServerError().json(outcome.decision),
    }
}
