#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use travel_genie_api::config::AppConfig;
use travel_genie_api::models::component::ComponentRegistry;
use travel_genie_api::routes;
use travel_genie_api::services::llm::retry::RetryPolicy;
use travel_genie_api::services::llm::{CompletionRequest, LlmClient, LlmError};
use travel_genie_api::services::theme_service::{PhotoSearch, ThemeService};
use travel_genie_api::services::travel_assistant::TravelAssistant;

/// Plays back queued replies in order and records every prompt it receives.
/// Once the queue is drained every call fails with `EmptyResponse`.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}

pub fn server_error() -> Result<String, LlmError> {
    Err(LlmError::Server {
        status: 503,
        message: "upstream unavailable".to_string(),
    })
}

pub fn rate_limited() -> Result<String, LlmError> {
    Err(LlmError::RateLimited("Rate limit reached for model".to_string()))
}

pub fn test_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::ZERO)
}

pub fn assistant(llm: Arc<ScriptedLlm>) -> TravelAssistant<ScriptedLlm> {
    TravelAssistant::new(llm, Arc::new(ComponentRegistry::new()), test_retry(), "USD")
}

pub struct TestApp {
    pub llm: Arc<ScriptedLlm>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new(llm: ScriptedLlm) -> Self {
        Self {
            llm: Arc::new(llm),
            config: AppConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let themes = ThemeService::new(
            self.llm.clone(),
            test_retry(),
            PhotoSearch::new(&self.config.photos).expect("photo client builds"),
        );

        App::new()
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(assistant(self.llm.clone())))
            .app_data(web::Data::new(themes))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure::<ScriptedLlm>)
    }
}
