mod common;

use serde_json::json;
use std::sync::Arc;

use common::{assistant, ScriptedLlm};
use travel_genie_api::models::conversation::Role;
use travel_genie_api::models::rendered::RenderedComponent;
use travel_genie_api::models::trip::TripDetails;
use travel_genie_api::services::chat_session::ChatSession;

fn tokyo_trip() -> TripDetails {
    TripDetails {
        destination: "Tokyo".to_string(),
        days: 7,
        budget: 2000.0,
        currency: None,
        theme: Some("neon".to_string()),
    }
}

fn props_of(component: &RenderedComponent) -> &serde_json::Value {
    match component {
        RenderedComponent::Component { props, .. } => props,
        other => panic!("expected a rendered component, got {:?}", other),
    }
}

#[actix_rt::test]
async fn test_start_seeds_welcome_and_first_itinerary() {
    let router = json!({
        "message": "Perfect! I've created a personalized 7-day itinerary for Tokyo.",
        "components": [{
            "name": "SmartItineraryPlanner",
            "needsGeneration": true,
            "props": {"destination": "Tokyo, Japan", "days": 7, "budget": 2000}
        }]
    })
    .to_string();
    let itinerary = json!({
        "itinerary": [{"day": 1, "activities": [{"time": "Morning", "activity": "Meiji Shrine", "cost": 0}]}]
    })
    .to_string();
    let llm = Arc::new(ScriptedLlm::replying(&[router.as_str(), itinerary.as_str()]));
    let assistant = assistant(llm.clone());

    let mut session = ChatSession::new();
    let reply = session.start(&assistant, tokyo_trip()).await;
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.components.len(), 1);
    let props = props_of(&reply.components[0]);
    assert_eq!(props["generatedItinerary"][0]["activities"][0]["activity"], "Meiji Shrine");
    assert!(props.get("sampleContent").is_none());

    let turns = session.turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(
        turns[0].content,
        "✈️ Welcome! I'm creating your 7-day Tokyo itinerary with a $2000 budget..."
    );
    assert!(llm.prompts()[0].contains("USER MESSAGE: \"I want to visit Tokyo for 7 days with a budget of $2000\""));
    assert!(llm.prompts()[0].contains("theme: neon"));
}

#[actix_rt::test]
async fn test_send_carries_recent_context_and_renders_fallbacks() {
    let itinerary_router = json!({
        "message": "Here is your plan.",
        "components": [{
            "name": "SmartItineraryPlanner",
            "needsGeneration": false,
            "props": {"destination": "Tokyo", "days": 2, "budget": 1000}
        }]
    })
    .to_string();
    let hotel_router = json!({
        "message": "Here are some great hotel options for you!",
        "components": [
            {"name": "HotelFinder", "props": {"destination": "Tokyo"}},
            {"name": "TeleportBooker", "props": {}}
        ]
    })
    .to_string();
    let llm = Arc::new(ScriptedLlm::replying(&[
        itinerary_router.as_str(),
        hotel_router.as_str(),
        r#"{"hotels": []}"#,
    ]));
    let assistant = assistant(llm.clone());

    let mut session = ChatSession::new();
    session.start(&assistant, tokyo_trip()).await;

    let reply = session
        .send(&assistant, "  show me hotels  ")
        .await
        .expect("non-blank message gets a reply");
    assert_eq!(reply.content, "Here are some great hotel options for you!");
    assert_eq!(reply.components.len(), 2);
    let hotels = props_of(&reply.components[0]);
    assert_eq!(hotels["sampleContent"], true);
    assert_eq!(hotels["generatedHotels"].as_array().unwrap().len(), 3);
    assert!(reply.components[1].is_placeholder());
    assert_eq!(reply.components[1].name(), "TeleportBooker");

    let turns = session.turns();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[2].role, Role::User);
    assert_eq!(turns[2].content, "show me hotels");

    let prompts = llm.prompts();
    assert!(prompts[1].contains("Previous conversation:\nassistant: ✈️ Welcome!"));
    assert!(prompts[1].contains("assistant: Here is your plan."));
    assert!(!prompts[1].contains("user: show me hotels"));
}

#[actix_rt::test]
async fn test_blank_message_is_ignored_and_clear_resets() {
    let llm = Arc::new(ScriptedLlm::replying(&[r#"{"message": "Hi!", "components": []}"#]));
    let assistant = assistant(llm.clone());

    let mut session = ChatSession::new();
    assert!(session.send(&assistant, "   ").await.is_none());
    assert_eq!(llm.calls(), 0);

    session.send(&assistant, "hello").await;
    assert_eq!(session.turns().len(), 2);

    session.clear();
    assert!(session.turns().is_empty());
    assert!(session.trip().is_none());
}

#[actix_rt::test]
async fn test_failed_turn_still_appends_fallback_reply() {
    let llm = Arc::new(ScriptedLlm::default());
    let assistant = assistant(llm.clone());

    let mut session = ChatSession::new();
    let reply = session.send(&assistant, "hello").await.unwrap();
    assert_eq!(reply.content, "Sorry, I encountered an error. Please try again!");
    assert!(reply.components.is_empty());
    assert_eq!(llm.calls(), 3);
}
