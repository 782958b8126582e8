use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::component::ComponentRegistry;
use crate::models::route_decision::RegistryEntry;
use crate::models::trip::TripDetails;
use crate::services::dispatch_service::{DispatchOutcome, DispatchRequest, Dispatcher};
use crate::services::llm::retry::RetryPolicy;
use crate::services::llm::LlmClient;
use crate::services::render_service::Renderer;
use crate::services::synthesis_service::ContentSynthesizer;

#[derive(Debug, Clone, Copy)]
pub struct TurnInput<'a> {
    pub message: &'a str,
    pub context: &'a str,
    /// Descriptions supplied by the caller; the built-in catalogue is used when absent.
    pub registry: Option<&'a [RegistryEntry]>,
    pub trip: Option<&'a TripDetails>,
}

/// Routing, content generation and rendering for one chat turn.
pub struct TravelAssistant<L> {
    registry: Arc<ComponentRegistry>,
    registry_entries: Vec<RegistryEntry>,
    dispatcher: Dispatcher<L>,
    synthesizer: ContentSynthesizer<L>,
    renderer: Renderer,
    default_currency: String,
}

impl<L: LlmClient> TravelAssistant<L> {
    pub fn new(
        llm: Arc<L>,
        registry: Arc<ComponentRegistry>,
        retry: RetryPolicy,
        default_currency: &str,
    ) -> Self {
        Self {
            registry_entries: registry.entries(),
            dispatcher: Dispatcher::new(llm.clone(), retry, default_currency),
            synthesizer: ContentSynthesizer::new(llm, retry, default_currency),
            renderer: Renderer::new(registry.clone(), default_currency),
            registry,
            default_currency: default_currency.to_string(),
        }
    }

    pub fn from_config(llm: Arc<L>, config: &AppConfig) -> Self {
        Self::new(
            llm,
            Arc::new(ComponentRegistry::new()),
            RetryPolicy::from(&config.llm),
            &config.default_currency,
        )
    }

    /// Routes the message and generates content for the chosen components.
    /// Always resolves; a failed routing call comes back as a canned reply.
    pub async fn run_turn(&self, input: TurnInput<'_>) -> DispatchOutcome {
        let turn_id = Uuid::new_v4();
        let registry = match input.registry {
            Some(entries) if !entries.is_empty() => entries,
            _ => self.registry_entries.as_slice(),
        };

        log::info!("[turn {}] routing message ({} chars)", turn_id, input.message.len());
        let mut outcome = self
            .dispatcher
            .route(DispatchRequest {
                message: input.message,
                context: input.context,
                registry,
                trip: input.trip,
            })
            .await;

        if let Some(failure) = outcome.failure {
            log::warn!("[turn {}] routing failed ({:?}), replying with fallback", turn_id, failure);
            return outcome;
        }

        let names: Vec<&str> = outcome.decision.components.iter().map(|c| c.name.as_str()).collect();
        log::info!("[turn {}] routed to {:?}", turn_id, names);

        if !outcome.decision.components.is_empty() {
            self.synthesizer
                .enrich_all(&mut outcome.decision, input.trip)
                .await;
        }

        log::info!("[turn {}] ready", turn_id);
        outcome
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }
}
