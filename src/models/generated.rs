use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst};

#[serde_as]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlannedActivity {
    #[serde(default)]
    pub time: String,
    pub activity: String,
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub cost: f64,
}

#[serde_as]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryDay {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub day: u32,
    #[serde(default)]
    pub activities: Vec<PlannedActivity>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BudgetCategory {
    pub category: String,
    pub amount: u64,
    pub percentage: u8,
}

/// Shape requested from the model for an itinerary. Any budget the model adds
/// is ignored; the breakdown is computed locally.
#[derive(Debug, Deserialize, Clone)]
pub struct GeneratedItinerary {
    pub itinerary: Vec<ItineraryDay>,
}

#[serde_as]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedHotel {
    pub name: String,
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub stars: u8,
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub price_per_night: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub rating: f64,
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub currency_symbol: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratedHotels {
    pub hotels: Vec<GeneratedHotel>,
}
