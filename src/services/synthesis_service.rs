use serde_json::Value;
use std::{fmt, sync::Arc};

use crate::models::component::props::{HotelFinderProps, SmartItineraryPlannerProps};
use crate::models::component::{ComponentKind, ComponentProps, SynthesisKind, ValidationError};
use crate::models::generated::{
    BudgetCategory, GeneratedHotel, GeneratedHotels, GeneratedItinerary, ItineraryDay,
};
use crate::models::route_decision::{RouteDecision, RoutedComponent};
use crate::models::trip::{currency_symbol, format_amount, TripDetails};
use crate::services::json_recovery::{parse_llm_json, JsonRecoveryError};
use crate::services::llm::retry::{complete_with_retry, RetryPolicy};
use crate::services::llm::{CompletionRequest, LlmClient, LlmError};

const ITINERARY_MAX_TOKENS: u32 = 4096;
const HOTELS_MAX_TOKENS: u32 = 1536;
const SYNTHESIS_TEMPERATURE: f32 = 0.7;

pub const HOTEL_COUNT: usize = 4;

/// Known-good hotel photos, assigned in rotation to generated hotels.
pub const HOTEL_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800",
    "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=800",
    "https://images.unsplash.com/photo-1555854877-bab0e564b8d5?w=800",
    "https://images.unsplash.com/photo-1611892440504-42a792e24d32?w=800",
];

/// Category, share of the total budget, and the share as a display percentage.
pub const BUDGET_SPLIT: [(&str, f64, u8); 5] = [
    ("Accommodation", 0.35, 35),
    ("Food & Dining", 0.25, 25),
    ("Activities", 0.20, 20),
    ("Transportation", 0.15, 15),
    ("Shopping", 0.05, 5),
];

#[derive(Debug)]
pub enum SynthesisError {
    Llm(LlmError),
    Parse(JsonRecoveryError),
    Shape(String),
    InvalidProps(ValidationError),
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisError::Llm(err) => write!(f, "Generation call failed: {}", err),
            SynthesisError::Parse(err) => write!(f, "Generated content unreadable: {}", err),
            SynthesisError::Shape(msg) => write!(f, "Generated content has the wrong shape: {}", msg),
            SynthesisError::InvalidProps(err) => write!(f, "Cannot generate content: {}", err),
        }
    }
}

impl std::error::Error for SynthesisError {}

impl From<LlmError> for SynthesisError {
    fn from(err: LlmError) -> Self {
        SynthesisError::Llm(err)
    }
}

impl From<JsonRecoveryError> for SynthesisError {
    fn from(err: JsonRecoveryError) -> Self {
        SynthesisError::Parse(err)
    }
}

impl From<ValidationError> for SynthesisError {
    fn from(err: ValidationError) -> Self {
        SynthesisError::InvalidProps(err)
    }
}

impl From<serde_json::Error> for SynthesisError {
    fn from(err: serde_json::Error) -> Self {
        SynthesisError::Shape(err.to_string())
    }
}

/// Splits `total` over the fixed categories, flooring each share.
pub fn budget_breakdown(total: f64) -> Vec<BudgetCategory> {
    let total = if total.is_finite() { total.max(0.0) } else { 0.0 };
    BUDGET_SPLIT
        .iter()
        .map(|(category, share, percentage)| BudgetCategory {
            category: category.to_string(),
            amount: (total * share).floor() as u64,
            percentage: *percentage,
        })
        .collect()
}

/// Replaces model-supplied images with the rotation and stamps the currency.
pub fn normalize_hotels(
    hotels: Vec<GeneratedHotel>,
    currency: &str,
    symbol: &str,
) -> Vec<GeneratedHotel> {
    hotels
        .into_iter()
        .take(HOTEL_COUNT)
        .enumerate()
        .map(|(i, hotel)| GeneratedHotel {
            image: HOTEL_IMAGES[i % HOTEL_IMAGES.len()].to_string(),
            currency: currency.to_string(),
            currency_symbol: symbol.to_string(),
            ..hotel
        })
        .collect()
}

struct Money {
    code: String,
    symbol: String,
}

pub struct ContentSynthesizer<L> {
    llm: Arc<L>,
    retry: RetryPolicy,
    default_currency: String,
}

impl<L: LlmClient> ContentSynthesizer<L> {
    pub fn new(llm: Arc<L>, retry: RetryPolicy, default_currency: impl Into<String>) -> Self {
        Self {
            llm,
            retry,
            default_currency: default_currency.into(),
        }
    }

    /// Enriches every component of the decision that asks for generated
    /// content, one after another. Failures leave that component's draft props
    /// untouched.
    pub async fn enrich_all(&self, decision: &mut RouteDecision, trip: Option<&TripDetails>) {
        for component in decision.components.iter_mut() {
            match self.enrich(component, trip).await {
                Ok(true) => log::info!("Generated content for {}", component.name),
                Ok(false) => {}
                Err(e) => log::error!("Content generation for {} failed: {}", component.name, e),
            }
        }
    }

    /// Returns `Ok(false)` when the component does not take generated content.
    pub async fn enrich(
        &self,
        component: &mut RoutedComponent,
        trip: Option<&TripDetails>,
    ) -> Result<bool, SynthesisError> {
        let kind = match component.name.parse::<ComponentKind>() {
            Ok(kind) => kind,
            Err(_) => return Ok(false),
        };
        let synthesis = match kind.wants_synthesis(component.needs_generation) {
            Some(synthesis) => synthesis,
            None => return Ok(false),
        };

        match (synthesis, kind.validate(&component.props)?) {
            (SynthesisKind::Itinerary, ComponentProps::SmartItineraryPlanner(props)) => {
                let money = self.money(props.currency.as_deref(), props.currency_symbol.as_deref(), trip);
                let days = self.synthesize_itinerary(&props, &money).await?;
                let breakdown = budget_breakdown(props.budget);

                let map = component.props_mut();
                map.insert("generatedItinerary".to_string(), serde_json::to_value(days)?);
                map.insert("generatedBudget".to_string(), serde_json::to_value(breakdown)?);
                map.entry("currency").or_insert(Value::String(money.code));
                map.entry("currencySymbol").or_insert(Value::String(money.symbol));
            }
            (SynthesisKind::Hotels, ComponentProps::HotelFinder(props)) => {
                let money = self.money(props.currency.as_deref(), props.currency_symbol.as_deref(), trip);
                let hotels = self.synthesize_hotels(&props, &money).await?;
                log::info!("Generated {} hotels for {}", hotels.len(), props.destination);

                let map = component.props_mut();
                map.insert("generatedHotels".to_string(), serde_json::to_value(hotels)?);
                map.insert("currency".to_string(), Value::String(money.code));
                map.insert("currencySymbol".to_string(), Value::String(money.symbol));
            }
            (synthesis, props) => {
                return Err(SynthesisError::Shape(format!(
                    "{:?} generation does not apply to {}",
                    synthesis,
                    props.kind().name()
                )));
            }
        }

        component.needs_generation = false;
        Ok(true)
    }

    fn money(&self, code: Option<&str>, symbol: Option<&str>, trip: Option<&TripDetails>) -> Money {
        let code = code
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string)
            .or_else(|| trip.map(|t| t.currency_or(&self.default_currency).to_string()))
            .unwrap_or_else(|| self.default_currency.clone())
            .trim()
            .to_uppercase();
        let symbol = symbol
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| currency_symbol(&code));

        Money { code, symbol }
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<Value, SynthesisError> {
        let request = CompletionRequest {
            prompt,
            max_tokens,
            temperature: SYNTHESIS_TEMPERATURE,
        };
        let text = complete_with_retry(self.llm.as_ref(), &self.retry, &request).await?;
        parse_llm_json(&text).map_err(|e| {
            log::warn!("Unparsable generated content: {}", text);
            SynthesisError::from(e)
        })
    }

    async fn synthesize_itinerary(
        &self,
        props: &SmartItineraryPlannerProps,
        money: &Money,
    ) -> Result<Vec<ItineraryDay>, SynthesisError> {
        let prompt = itinerary_prompt(props, money);
        let generated: GeneratedItinerary =
            serde_json::from_value(self.generate(&prompt, ITINERARY_MAX_TOKENS).await?)?;

        if generated.itinerary.is_empty() {
            return Err(SynthesisError::Shape("itinerary has no days".to_string()));
        }
        Ok(generated.itinerary)
    }

    async fn synthesize_hotels(
        &self,
        props: &HotelFinderProps,
        money: &Money,
    ) -> Result<Vec<GeneratedHotel>, SynthesisError> {
        let prompt = hotels_prompt(props, money);
        let generated: GeneratedHotels =
            serde_json::from_value(self.generate(&prompt, HOTELS_MAX_TOKENS).await?)?;

        if generated.hotels.is_empty() {
            return Err(SynthesisError::Shape("hotel list is empty".to_string()));
        }
        Ok(normalize_hotels(generated.hotels, &money.code, &money.symbol))
    }
}

fn itinerary_prompt(props: &SmartItineraryPlannerProps, money: &Money) -> String {
    let budget = format_amount(props.budget);
    let breakdown = budget_breakdown(props.budget)
        .iter()
        .map(|c| {
            format!(
                "    {{ \"category\": \"{}\", \"amount\": {}, \"percentage\": {} }}",
                c.category, c.amount, c.percentage
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    let mut focus = String::new();
    if let Some(style) = props.travel_style {
        let style = format!("{:?}", style).to_lowercase();
        focus.push_str(&format!("- Travel style: {}\n", style));
    }
    if let Some(interests) = props.interests.as_ref().filter(|i| !i.is_empty()) {
        focus.push_str(&format!("- Focus on: {}\n", interests.join(", ")));
    }

    format!(
        r#"Create a UNIQUE {days}-day itinerary for {destination} with {symbol}{budget} ({code}) budget.

Rules:
- Each day must have 3 COMPLETELY DIFFERENT activities (morning, afternoon, evening)
- NO REPEATED ACTIVITIES across all days
- Include realistic costs for each activity in {code}
- Use actual place names when possible
{focus}
Respond with ONLY this JSON (no markdown):
{{
  "itinerary": [
    {{
      "day": 1,
      "activities": [
        {{ "time": "Morning", "activity": "Unique activity 1", "cost": 0 }},
        {{ "time": "Afternoon", "activity": "Unique activity 2", "cost": 50 }},
        {{ "time": "Evening", "activity": "Unique activity 3", "cost": 80 }}
      ]
    }}
  ],
  "budgetBreakdown": [
{breakdown}
  ]
}}"#,
        days = props.days,
        destination = props.destination,
        symbol = money.symbol,
        budget = budget,
        code = money.code,
        focus = focus,
        breakdown = breakdown,
    )
}

fn hotels_prompt(props: &HotelFinderProps, money: &Money) -> String {
    let stay = match (props.check_in.as_deref(), props.check_out.as_deref()) {
        (Some(check_in), Some(check_out)) => format!(" for a stay from {} to {}", check_in, check_out),
        _ => String::new(),
    };

    format!(
        r#"Find {count} REAL and highly-rated hotels in {destination}{stay}.

Rules:
- Provide a mix of luxury, boutique, and budget options
- REAL names, prices, and amenities
- Prices per night in {code} ({symbol})
- 1 "Best Value" option
- 1 "Luxury" option

Respond with ONLY this JSON (no markdown):
{{
  "hotels": [
    {{
      "name": "Hotel Name",
      "stars": 4,
      "pricePerNight": 150,
      "location": "City Center",
      "amenities": ["Pool", "WiFi", "Spa"],
      "rating": 4.5,
      "reviews": 1200
    }}
  ]
}}"#,
        count = HOTEL_COUNT,
        destination = props.destination,
        stay = stay,
        code = money.code,
        symbol = money.symbol,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_budget_breakdown_for_2000() {
        let amounts: Vec<u64> = budget_breakdown(2000.0).iter().map(|c| c.amount).collect();
        assert_eq!(amounts, vec![700, 500, 400, 300, 100]);
        assert_eq!(amounts.iter().sum::<u64>(), 2000);
    }

    #[test]
    fn test_budget_breakdown_floors_each_category() {
        let breakdown = budget_breakdown(1999.0);
        let amounts: Vec<u64> = breakdown.iter().map(|c| c.amount).collect();
        assert_eq!(amounts, vec![699, 499, 399, 299, 99]);
        let percentages: u32 = breakdown.iter().map(|c| u32::from(c.percentage)).sum();
        assert_eq!(percentages, 100);
    }

    #[test]
    fn test_budget_breakdown_floors_fractional_shares() {
        let mut budgets: Vec<f64> = vec![180.0, 340.0, 360.0, 660.0, 680.0, 700.0, 720.0, 1300.0];
        budgets.extend((1..=5000).map(|b| f64::from(b) * 7.0));

        for budget in budgets {
            let amounts: Vec<u64> = budget_breakdown(budget).iter().map(|c| c.amount).collect();
            let expected: Vec<u64> = [0.35, 0.25, 0.20, 0.15, 0.05]
                .iter()
                .map(|share| (budget * share).floor() as u64)
                .collect();
            assert_eq!(amounts, expected, "budget {}", budget);
        }
        assert_eq!(budget_breakdown(180.0)[0].amount, 62);
    }

    #[test]
    fn test_budget_breakdown_rejects_negative_budget() {
        assert!(budget_breakdown(-50.0).iter().all(|c| c.amount == 0));
        assert!(budget_breakdown(f64::NAN).iter().all(|c| c.amount == 0));
    }

    #[test]
    fn test_normalize_hotels_rotates_images_and_caps_count() {
        let hotels: Vec<GeneratedHotel> = (0..6)
            .map(|i| {
                serde_json::from_value(json!({
                    "name": format!("Hotel {}", i),
                    "image": "https://evil.example.com/fake.jpg"
                }))
                .unwrap()
            })
            .collect();

        let normalized = normalize_hotels(hotels, "EUR", "€");
        assert_eq!(normalized.len(), HOTEL_COUNT);
        for (i, hotel) in normalized.iter().enumerate() {
            assert_eq!(hotel.image, HOTEL_IMAGES[i % 4]);
            assert_eq!(hotel.currency, "EUR");
            assert_eq!(hotel.currency_symbol, "€");
        }
    }

    #[test]
    fn test_generated_hotel_tolerates_loose_numbers() {
        let hotel: GeneratedHotel = serde_json::from_value(json!({
            "name": "Casa Azul",
            "stars": "4",
            "pricePerNight": "120.5",
            "rating": "excellent",
            "amenities": ["WiFi"]
        }))
        .unwrap();

        assert_eq!(hotel.stars, 4);
        assert_eq!(hotel.price_per_night, 120.5);
        assert_eq!(hotel.rating, 0.0);
    }
}
