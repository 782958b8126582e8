mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use serial_test::serial;

use common::{ScriptedLlm, TestApp};
use travel_genie_api::models::component::ComponentKind;

fn valid_props(kind: ComponentKind) -> Value {
    match kind {
        ComponentKind::WorldMapExplorer => json!({}),
        ComponentKind::SmartItineraryPlanner => {
            json!({"destination": "Kyoto", "days": 4, "budget": 1600, "travelStyle": "comfort"})
        }
        ComponentKind::DestinationExplorer => json!({
            "place": "Hampi", "highlights": ["Virupaksha Temple", "Stone Chariot"], "bestSeason": "Winter"
        }),
        ComponentKind::BudgetOptimizer => json!({"budget": "1200", "destination": "Bali", "days": 6}),
        ComponentKind::SeasonalRecommender => json!({"destination": "Iceland"}),
        ComponentKind::VisaRequirementChecker => json!({"destination": "Japan", "nationality": null}),
        ComponentKind::PackingListGenerator => json!({"destination": "Oslo", "days": 5, "season": "winter"}),
        ComponentKind::TravelBuddyMatcher => json!({"groupSize": 3, "tripType": "hiking"}),
        ComponentKind::FlightFinder => json!({"from": "BLR", "to": "NRT"}),
        ComponentKind::HotelFinder => json!({"destination": "Lisbon", "guests": 2}),
        ComponentKind::TransportComparison => json!({"origin": "Paris", "destination": "London"}),
        ComponentKind::BookingConfirmation => json!({
            "bookingType": "hotel",
            "confirmationNumber": "TG-4821",
            "details": {"title": "Hotel Alfama", "date": "2026-05-02", "checkIn": "2026-05-02"},
            "totalPrice": 540
        }),
        ComponentKind::LocalGuide => json!({"nearbySpot": "Time Out Market", "type": "Food", "distance": "400m"}),
        ComponentKind::WeatherAlerts => json!({"location": "Reykjavik"}),
        ComponentKind::DailyAgenda => json!({"location": "Rome", "date": "2026-06-01"}),
        ComponentKind::ExpenseTracker => json!({"category": "Food", "amount": 42.5}),
        ComponentKind::RealTimeTranslator => json!({"sourceLang": "en", "targetLang": "ja"}),
        ComponentKind::LanguageHelper => json!({"language": "Japanese", "category": "dining"}),
        ComponentKind::CurrencyConverter => json!({"from": "USD", "to": "JPY", "amount": 100}),
        ComponentKind::SplitExpenseTracker => json!({
            "travelers": ["Ana", "Ben"],
            "expenses": [{"description": "Dinner", "amount": 80, "paidBy": "Ana"}]
        }),
        ComponentKind::TripDashboard => json!({
            "destination": "Tokyo",
            "tripStartDate": "2026-04-01",
            "daysRemaining": 12,
            "upcomingEvents": [{"title": "Flight to NRT", "time": "09:40", "type": "flight"}]
        }),
        ComponentKind::EmergencyCrisisCard => json!({"emergencyType": "lost_passport", "location": "Madrid"}),
        ComponentKind::TripStats => json!({"totalSpent": "$1,240", "topCategory": "Food"}),
        ComponentKind::TripJournalGenerator => json!({
            "destination": "Bali",
            "startDate": "2026-03-01",
            "endDate": "2026-03-08",
            "highlights": ["Ubud rice terraces"],
            "totalExpenses": 1450
        }),
        ComponentKind::PhotoGalleryOrganizer => json!({"destination": "Santorini", "photoCount": 212}),
        ComponentKind::PreferenceCapture => json!({"preferences": {"budgetLevel": "mid", "pacePreference": "relaxed"}}),
    }
}

fn render_request(name: &str, props: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/components/render")
        .set_json(json!({"name": name, "props": props}))
}

#[actix_rt::test]
#[serial]
async fn test_list_components() {
    let test_app = TestApp::new(ScriptedLlm::default());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/components").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), ComponentKind::ALL.len());
    assert_eq!(entries[0]["name"], "WorldMapExplorer");
    assert!(entries
        .iter()
        .all(|e| !e["description"].as_str().unwrap().is_empty()));
}

#[actix_rt::test]
#[serial]
async fn test_every_component_renders_with_valid_props() {
    let test_app = TestApp::new(ScriptedLlm::default());
    let app = test::init_service(test_app.create_app()).await;

    for kind in ComponentKind::ALL {
        let resp = test::call_service(
            &app,
            render_request(kind.name(), valid_props(*kind)).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "component", "{} did not render: {}", kind.name(), body);
        assert_eq!(body["name"], kind.name());
    }
    assert_eq!(test_app.llm.calls(), 0);
}

#[actix_rt::test]
#[serial]
async fn test_unknown_component_is_isolated() {
    let test_app = TestApp::new(ScriptedLlm::default());
    let app = test::init_service(test_app.create_app()).await;

    let mut rendered = Vec::new();
    for (name, props) in [
        ("WeatherAlerts", valid_props(ComponentKind::WeatherAlerts)),
        ("HologramTourGuide", json!({"city": "Tokyo"})),
        ("CurrencyConverter", valid_props(ComponentKind::CurrencyConverter)),
    ] {
        let resp = test::call_service(&app, render_request(name, props).to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        rendered.push(body);
    }

    let placeholders: Vec<&Value> = rendered.iter().filter(|r| r["kind"] == "placeholder").collect();
    assert_eq!(placeholders.len(), 1);
    assert_eq!(placeholders[0]["reason"], "not_found");
    assert_eq!(placeholders[0]["message"], "Component not found: HologramTourGuide");
    assert_eq!(rendered[0]["kind"], "component");
    assert_eq!(rendered[2]["kind"], "component");
}

#[actix_rt::test]
#[serial]
async fn test_invalid_props_render_placeholder() {
    let test_app = TestApp::new(ScriptedLlm::default());
    let app = test::init_service(test_app.create_app()).await;

    let resp = test::call_service(
        &app,
        render_request(
            "DestinationExplorer",
            json!({"place": "Rome", "highlights": ["a", "b", "c", "d"], "bestSeason": "Spring"}),
        )
        .to_request(),
    )
    .await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "placeholder");
    assert_eq!(body["reason"], "invalid_data");
    assert_eq!(body["message"], "Invalid component data");
}
