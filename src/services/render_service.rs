use serde_json::{json, Map, Value};
use std::{fmt, sync::Arc};

use crate::models::component::props::{HotelFinderProps, SmartItineraryPlannerProps};
use crate::models::component::{ComponentProps, ComponentRegistry};
use crate::models::generated::{GeneratedHotel, ItineraryDay, PlannedActivity};
use crate::models::rendered::{PlaceholderReason, RenderedComponent};
use crate::models::route_decision::RoutedComponent;
use crate::models::trip::currency_symbol;
use crate::services::synthesis_service::{budget_breakdown, normalize_hotels};

const MORNING: [&str; 4] = [
    "Guided walking tour of the old town",
    "Visit the main local market",
    "Sunrise viewpoint and breakfast",
    "Morning at the city's top museum",
];
const AFTERNOON: [&str; 4] = [
    "Lunch at a local favourite and neighbourhood stroll",
    "Explore the historic landmarks",
    "Cooking class with regional dishes",
    "Park, gardens and café hopping",
];
const EVENING: [&str; 4] = [
    "Sunset dinner with local cuisine",
    "Night market and street food",
    "Cultural show or live music",
    "Riverside or waterfront walk",
];

#[derive(Debug)]
pub enum RenderError {
    Serialization(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Serialization(err) => write!(f, "Failed to build component data: {}", err),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

/// Validates routed components and turns them into render payloads, one
/// placeholder per failing component.
#[derive(Clone)]
pub struct Renderer {
    registry: Arc<ComponentRegistry>,
    default_currency: String,
}

impl Renderer {
    pub fn new(registry: Arc<ComponentRegistry>, default_currency: impl Into<String>) -> Self {
        Self {
            registry,
            default_currency: default_currency.into(),
        }
    }

    pub fn render(&self, name: &str, props: &Value) -> RenderedComponent {
        let descriptor = match self.registry.lookup(name) {
            Some(descriptor) => descriptor,
            None => {
                log::error!("Component {} not found", name);
                return RenderedComponent::placeholder(name, PlaceholderReason::NotFound);
            }
        };

        let validated = match descriptor.kind.validate(props) {
            Ok(validated) => validated,
            Err(e) => {
                log::error!("Props validation error: {}", e);
                return RenderedComponent::placeholder(name, PlaceholderReason::InvalidData);
            }
        };

        match self.build_props(validated, props) {
            Ok(props) => RenderedComponent::Component {
                name: descriptor.name.to_string(),
                props,
            },
            Err(e) => {
                log::error!("Component render error for {}: {}", name, e);
                RenderedComponent::placeholder(name, PlaceholderReason::RenderFailed)
            }
        }
    }

    pub fn render_all(&self, components: &[RoutedComponent]) -> Vec<RenderedComponent> {
        components
            .iter()
            .map(|component| self.render(&component.name, &component.props))
            .collect()
    }

    fn build_props(&self, validated: ComponentProps, raw: &Value) -> Result<Value, RenderError> {
        let mut props: Map<String, Value> = raw.as_object().cloned().unwrap_or_default();

        match validated {
            ComponentProps::SmartItineraryPlanner(p) => self.itinerary_props(&p, &mut props)?,
            ComponentProps::HotelFinder(p) => self.hotel_props(&p, &mut props)?,
            _ => {}
        }

        Ok(Value::Object(props))
    }

    fn currency(&self, code: Option<&str>, symbol: Option<&str>) -> (String, String) {
        let code = code
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(self.default_currency.as_str())
            .to_uppercase();
        let symbol = symbol
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| currency_symbol(&code));
        (code, symbol)
    }

    /// Fills in a sample plan when no itinerary was generated.
    fn itinerary_props(
        &self,
        p: &SmartItineraryPlannerProps,
        props: &mut Map<String, Value>,
    ) -> Result<(), RenderError> {
        let (code, symbol) = self.currency(p.currency.as_deref(), p.currency_symbol.as_deref());
        props.entry("currency").or_insert(Value::String(code));
        props.entry("currencySymbol").or_insert(Value::String(symbol));

        let has_itinerary = props
            .get("generatedItinerary")
            .map_or(false, |v| v.as_array().map_or(false, |days| !days.is_empty()));
        if !has_itinerary {
            props.insert(
                "generatedItinerary".to_string(),
                serde_json::to_value(sample_itinerary(p))?,
            );
            props.insert("sampleContent".to_string(), json!(true));
        }

        if !props.get("generatedBudget").map_or(false, Value::is_array) {
            props.insert(
                "generatedBudget".to_string(),
                serde_json::to_value(budget_breakdown(p.budget))?,
            );
        }
        Ok(())
    }

    /// Fills in sample hotels when none were generated.
    fn hotel_props(&self, p: &HotelFinderProps, props: &mut Map<String, Value>) -> Result<(), RenderError> {
        let (code, symbol) = self.currency(p.currency.as_deref(), p.currency_symbol.as_deref());

        let has_hotels = props
            .get("generatedHotels")
            .map_or(false, |v| v.as_array().map_or(false, |hotels| !hotels.is_empty()));
        if !has_hotels {
            let hotels = normalize_hotels(sample_hotels(&p.destination), &code, &symbol);
            props.insert("generatedHotels".to_string(), serde_json::to_value(hotels)?);
            props.insert("sampleContent".to_string(), json!(true));
        }

        props.entry("currency").or_insert(Value::String(code));
        props.entry("currencySymbol").or_insert(Value::String(symbol));
        Ok(())
    }
}

fn sample_itinerary(p: &SmartItineraryPlannerProps) -> Vec<ItineraryDay> {
    let slots = f64::from(p.days.max(1) * 3);
    let activities_share = budget_breakdown(p.budget)
        .iter()
        .find(|c| c.category == "Activities")
        .map_or(0, |c| c.amount);
    let cost = (activities_share as f64 / slots).floor();

    (0..p.days)
        .map(|i| {
            let i = i as usize;
            ItineraryDay {
                day: i as u32 + 1,
                activities: vec![
                    PlannedActivity {
                        time: "Morning".to_string(),
                        activity: format!("{} in {}", MORNING[i % MORNING.len()], p.destination),
                        cost: 0.0,
                    },
                    PlannedActivity {
                        time: "Afternoon".to_string(),
                        activity: AFTERNOON[i % AFTERNOON.len()].to_string(),
                        cost,
                    },
                    PlannedActivity {
                        time: "Evening".to_string(),
                        activity: EVENING[i % EVENING.len()].to_string(),
                        cost,
                    },
                ],
            }
        })
        .collect()
}

fn sample_hotels(destination: &str) -> Vec<GeneratedHotel> {
    let hotel = |name: &str, stars: u8, price: f64, location: &str, amenities: &[&str], rating: f64, reviews: u32| {
        GeneratedHotel {
            name: name.to_string(),
            stars,
            price_per_night: price,
            location: format!("{}, {}", location, destination),
            amenities: amenities.iter().map(|a| a.to_string()).collect(),
            rating,
            reviews,
            image: String::new(),
            currency: String::new(),
            currency_symbol: String::new(),
        }
    };

    vec![
        hotel("Grand Luxury Hotel", 5, 250.0, "City Center", &["Pool", "Spa", "Restaurant", "Gym"], 4.8, 2847),
        hotel("Boutique Comfort Inn", 4, 120.0, "Historic District", &["Breakfast", "WiFi", "Rooftop Bar"], 4.5, 1523),
        hotel("Budget Traveler Hostel", 3, 45.0, "Near Station", &["WiFi", "Shared Kitchen", "Lockers"], 4.2, 892),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(Arc::new(ComponentRegistry::new()), "USD")
    }

    #[test]
    fn test_unknown_component_gets_not_found_placeholder() {
        let rendered = renderer().render("TeleportBooker", &json!({}));
        match rendered {
            RenderedComponent::Placeholder { reason, message, .. } => {
                assert_eq!(reason, PlaceholderReason::NotFound);
                assert_eq!(message, "Component not found: TeleportBooker");
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_props_get_invalid_data_placeholder() {
        let rendered = renderer().render("CurrencyConverter", &json!({"from": "USD"}));
        assert_eq!(
            rendered,
            RenderedComponent::placeholder("CurrencyConverter", PlaceholderReason::InvalidData)
        );
    }

    #[test]
    fn test_itinerary_without_generation_uses_sample_content() {
        let rendered = renderer().render(
            "SmartItineraryPlanner",
            &json!({"destination": "Lisbon", "days": 2, "budget": 900}),
        );

        let props = match rendered {
            RenderedComponent::Component { props, .. } => props,
            other => panic!("expected component, got {:?}", other),
        };
        assert_eq!(props["sampleContent"], json!(true));
        assert_eq!(props["generatedItinerary"].as_array().unwrap().len(), 2);
        assert_eq!(props["generatedBudget"][0]["amount"], json!(315));
        assert_eq!(props["currencySymbol"], json!("$"));
    }

    #[test]
    fn test_negative_budget_renders_with_empty_breakdown() {
        let rendered = renderer().render(
            "SmartItineraryPlanner",
            &json!({"destination": "Lisbon", "days": 1, "budget": -100}),
        );

        let props = match rendered {
            RenderedComponent::Component { props, .. } => props,
            other => panic!("expected component, got {:?}", other),
        };
        let budget = props["generatedBudget"].as_array().unwrap();
        assert_eq!(budget.len(), 5);
        assert!(budget.iter().all(|c| c["amount"] == json!(0)));
    }

    #[test]
    fn test_generated_itinerary_is_kept() {
        let rendered = renderer().render(
            "SmartItineraryPlanner",
            &json!({
                "destination": "Lisbon",
                "days": 1,
                "budget": 500,
                "currency": "EUR",
                "generatedItinerary": [{"day": 1, "activities": []}]
            }),
        );

        let props = match rendered {
            RenderedComponent::Component { props, .. } => props,
            other => panic!("expected component, got {:?}", other),
        };
        assert!(props.get("sampleContent").is_none());
        assert_eq!(props["generatedItinerary"][0]["day"], json!(1));
        assert_eq!(props["currencySymbol"], json!("€"));
    }

    #[test]
    fn test_hotels_fall_back_to_samples() {
        let rendered = renderer().render("HotelFinder", &json!({"destination": "Bali"}));
        let props = match rendered {
            RenderedComponent::Component { props, .. } => props,
            other => panic!("expected component, got {:?}", other),
        };

        let hotels = props["generatedHotels"].as_array().unwrap();
        assert_eq!(hotels.len(), 3);
        assert_eq!(hotels[0]["location"], json!("City Center, Bali"));
        assert_eq!(hotels[0]["currency"], json!("USD"));
    }

    #[test]
    fn test_plain_component_passes_props_through() {
        let rendered = renderer().render("WeatherAlerts", &json!({"location": "Reykjavik"}));
        assert_eq!(
            rendered,
            RenderedComponent::Component {
                name: "WeatherAlerts".to_string(),
                props: json!({"location": "Reykjavik"}),
            }
        );
    }
}
