use crate::models::conversation::{flatten_recent, ConversationTurn};
use crate::models::trip::{currency_symbol, format_amount, TripDetails};
use crate::services::llm::LlmClient;
use crate::services::travel_assistant::{TravelAssistant, TurnInput};

/// Number of trailing turns given to the router as context.
pub const CONTEXT_TURNS: usize = 5;

/// One user's conversation. Turns are append-only until `clear`.
#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<ConversationTurn>,
    trip: Option<TripDetails>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the conversation from trip setup and asks for the first itinerary.
    pub async fn start<L: LlmClient>(
        &mut self,
        assistant: &TravelAssistant<L>,
        trip: TripDetails,
    ) -> &ConversationTurn {
        self.turns.clear();
        let currency = trip.currency_or(assistant.default_currency()).to_uppercase();
        self.turns.push(ConversationTurn::assistant(
            format!(
                "✈️ Welcome! I'm creating your {}-day {} itinerary with a {}{} budget...",
                trip.days,
                trip.destination,
                currency_symbol(&currency),
                format_amount(trip.budget)
            ),
            Vec::new(),
        ));

        let opening = trip.opening_request(assistant.default_currency());
        self.trip = Some(trip);
        self.reply(assistant, &opening, "").await
    }

    /// Appends the user's message and the assistant's reply. Blank input is ignored.
    pub async fn send<L: LlmClient>(
        &mut self,
        assistant: &TravelAssistant<L>,
        text: &str,
    ) -> Option<&ConversationTurn> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let context = flatten_recent(&self.turns, CONTEXT_TURNS);
        self.turns.push(ConversationTurn::user(text));
        Some(self.reply(assistant, text, &context).await)
    }

    async fn reply<L: LlmClient>(
        &mut self,
        assistant: &TravelAssistant<L>,
        message: &str,
        context: &str,
    ) -> &ConversationTurn {
        let outcome = assistant
            .run_turn(TurnInput {
                message,
                context,
                registry: None,
                trip: self.trip.as_ref(),
            })
            .await;

        let components = assistant.renderer().render_all(&outcome.decision.components);
        self.turns
            .push(ConversationTurn::assistant(outcome.decision.message, components));
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn trip(&self) -> Option<&TripDetails> {
        self.trip.as_ref()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.trip = None;
    }
}
