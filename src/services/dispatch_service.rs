use std::sync::Arc;

use crate::models::route_decision::{RegistryEntry, RouteDecision};
use crate::models::trip::{currency_symbol, format_amount, TripDetails};
use crate::services::json_recovery::parse_llm_json;
use crate::services::llm::retry::{complete_with_retry, RetryPolicy};
use crate::services::llm::{CompletionRequest, LlmClient, LlmError};

const ROUTER_MAX_TOKENS: u32 = 1024;
const ROUTER_TEMPERATURE: f32 = 0.7;

pub const RATE_LIMIT_MESSAGE: &str =
    "I'm receiving too many requests right now. Please give me a moment to catch my breath! 😅";
pub const UPSTREAM_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again!";

/// Why a turn ended on a canned reply instead of a model decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnFailure {
    RateLimited,
    Upstream,
}

impl TurnFailure {
    pub fn from_error(err: &LlmError) -> Self {
        if err.is_rate_limit() {
            TurnFailure::RateLimited
        } else {
            TurnFailure::Upstream
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            TurnFailure::RateLimited => RATE_LIMIT_MESSAGE,
            TurnFailure::Upstream => UPSTREAM_ERROR_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub decision: RouteDecision,
    pub failure: Option<TurnFailure>,
}

impl DispatchOutcome {
    pub fn failed(failure: TurnFailure) -> Self {
        Self {
            decision: RouteDecision::conversational(failure.message()),
            failure: Some(failure),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DispatchRequest<'a> {
    pub message: &'a str,
    /// Already flattened `role: content` lines of the recent conversation.
    pub context: &'a str,
    pub registry: &'a [RegistryEntry],
    pub trip: Option<&'a TripDetails>,
}

pub struct Dispatcher<L> {
    llm: Arc<L>,
    retry: RetryPolicy,
    default_currency: String,
}

impl<L: LlmClient> Dispatcher<L> {
    pub fn new(llm: Arc<L>, retry: RetryPolicy, default_currency: impl Into<String>) -> Self {
        Self {
            llm,
            retry,
            default_currency: default_currency.into(),
        }
    }

    /// Asks the model which components to show for this message.
    /// Always yields a decision; upstream failures are reported in `failure`.
    pub async fn route(&self, request: DispatchRequest<'_>) -> DispatchOutcome {
        let prompt = self.build_prompt(&request);
        let completion = CompletionRequest {
            prompt: &prompt,
            max_tokens: ROUTER_MAX_TOKENS,
            temperature: ROUTER_TEMPERATURE,
        };

        match complete_with_retry(self.llm.as_ref(), &self.retry, &completion).await {
            Ok(text) => DispatchOutcome {
                decision: parse_route_decision(&text),
                failure: None,
            },
            Err(e) => {
                log::error!("Routing failed: {}", e);
                DispatchOutcome::failed(TurnFailure::from_error(&e))
            }
        }
    }

    pub fn build_prompt(&self, request: &DispatchRequest<'_>) -> String {
        let history = if request.context.trim().is_empty() {
            String::new()
        } else {
            format!("Previous conversation:\n{}\n\n", request.context.trim())
        };

        let components = request
            .registry
            .iter()
            .map(|entry| format!("- {}: {}", entry.name, entry.description))
            .collect::<Vec<_>>()
            .join("\n");

        let currency = request
            .trip
            .map(|trip| trip.currency_or(&self.default_currency).to_uppercase())
            .unwrap_or_else(|| self.default_currency.clone());
        let symbol = currency_symbol(&currency);

        let trip_context = match request.trip {
            Some(trip) => format!(
                "TRIP DETAILS: {} for {} days, total budget {}{} ({}){}\n\n",
                trip.destination,
                trip.days,
                symbol,
                format_amount(trip.budget),
                currency,
                trip.theme
                    .as_deref()
                    .map(|theme| format!(", theme: {}", theme))
                    .unwrap_or_default()
            ),
            None => String::new(),
        };

        format!(
            r#"You are Travel Genie AI. Analyze the user's message and decide which component(s) to render.

{history}{trip_context}USER MESSAGE: "{message}"

AVAILABLE COMPONENTS:
{components}

CRITICAL COMPONENT TRIGGER RULES:
1. "show me hotels" / "find hotels" / "where to stay" / "accommodation" → HotelFinder
2. "show flights" / "find flights" / "book flight" → FlightFinder
3. "weather" / "temperature" / "will it rain" → WeatherAlerts
4. "convert currency" / "exchange rate" / "how much is X in Y" → CurrencyConverter
5. "visa" / "do I need visa" / "visa requirements" → VisaRequirementChecker
6. "what to pack" / "packing list" → PackingListGenerator
7. "how to say" / "translate" / "language help" / "phrases" → LanguageHelper
8. "how to get from X to Y" / "transport" / "train vs flight" → TransportComparison
9. Initial trip planning (budget + days + destination) → SmartItineraryPlanner

IMPORTANT:
- If user asks for hotels, you MUST use HotelFinder component
- If user asks for weather, you MUST use WeatherAlerts component
- If just chatting/asking general questions → conversational response only (no component)
- For trip planning questions → SmartItineraryPlanner component
- All prices and budgets are in {currency}. Set "currency": "{currency}" and "currencySymbol": "{symbol}" on SmartItineraryPlanner and HotelFinder props
- Numbers (days, budget, guests) must be plain JSON numbers

Respond with ONLY valid JSON (no markdown, no code blocks):
{{
  "message": "Brief response to user",
  "components": [
    {{
      "name": "ComponentName",
      "needsGeneration": false,
      "props": {{ "required": "props", "from": "user message" }}
    }}
  ]
}}

If no component needed, use empty array: "components": []

Examples:

User: "show me hotels"
Response: {{
  "message": "Here are some great hotel options for you!",
  "components": [{{
    "name": "HotelFinder",
    "needsGeneration": false,
    "props": {{
      "destination": "extracted location",
      "checkIn": "2026-02-15",
      "checkOut": "2026-02-20",
      "guests": 1,
      "currency": "{currency}",
      "currencySymbol": "{symbol}"
    }}
  }}]
}}

User: "what's the best food to try?"
Response: {{
  "message": "You should definitely try local delicacies like...",
  "components": []
}}

User: "I have {symbol}2000 for 7 days in Tokyo"
Response: {{
  "message": "Perfect! I've created a personalized 7-day itinerary for Tokyo.",
  "components": [{{
    "name": "SmartItineraryPlanner",
    "needsGeneration": true,
    "props": {{
      "destination": "Tokyo, Japan",
      "days": 7,
      "budget": 2000,
      "currency": "{currency}",
      "currencySymbol": "{symbol}"
    }}
  }}]
}}"#,
            history = history,
            trip_context = trip_context,
            message = request.message,
            components = components,
            currency = currency,
            symbol = symbol,
        )
    }
}

/// Turns raw router output into a decision. Output that holds no usable JSON
/// object becomes a plain conversational reply.
pub fn parse_route_decision(raw: &str) -> RouteDecision {
    match parse_llm_json(raw) {
        Ok(value) => match serde_json::from_value::<RouteDecision>(value) {
            Ok(decision) => decision,
            Err(e) => {
                log::warn!("Router JSON did not match the decision shape: {}", e);
                RouteDecision::conversational(raw.trim())
            }
        },
        Err(e) => {
            log::warn!("{}; treating reply as conversational. Raw: {}", e, raw);
            RouteDecision::conversational(raw.trim())
        }
    }
}
