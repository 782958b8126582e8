//! Prop schemas for every widget in the catalogue.
//!
//! Unknown keys are ignored so that synthesized data (`generatedItinerary`,
//! `generatedHotels`, ...) can ride along with the draft props. Optional fields
//! accept both a missing key and `null`. Numeric fields marked as coercing
//! also accept numbers sent as strings.

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Extra checks that the serde shape cannot express.
pub trait ComponentSchema: serde::de::DeserializeOwned {
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Luxury,
    Comfort,
    Budget,
    Backpacker,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Flight,
    Hotel,
    Activity,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SpotType {
    Food,
    Sight,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PhraseCategory {
    Greetings,
    Dining,
    Emergency,
    Shopping,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyType {
    LostPassport,
    MissedFlight,
    Medical,
    Theft,
    General,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Budget,
    Mid,
    Luxury,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PacePreference {
    Relaxed,
    Moderate,
    Packed,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CrowdTolerance {
    Quiet,
    Moderate,
    Bustling,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorldMapExplorerProps {}

impl ComponentSchema for WorldMapExplorerProps {}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SmartItineraryPlannerProps {
    pub destination: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub days: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub budget: f64,
    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
    pub travel_style: Option<TravelStyle>,
    pub interests: Option<Vec<String>>,
}

impl ComponentSchema for SmartItineraryPlannerProps {
    fn check(&self) -> Result<(), String> {
        if !(1..=30).contains(&self.days) {
            return Err(format!("days must be between 1 and 30, got {}", self.days));
        }
        if !self.budget.is_finite() {
            return Err(format!("budget must be a finite number, got {}", self.budget));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DestinationExplorerProps {
    pub place: String,
    pub highlights: Vec<String>,
    pub best_season: String,
}

impl ComponentSchema for DestinationExplorerProps {
    fn check(&self) -> Result<(), String> {
        if self.highlights.len() > 3 {
            return Err(format!(
                "at most 3 highlights allowed, got {}",
                self.highlights.len()
            ));
        }
        Ok(())
    }
}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
pub struct BudgetOptimizerProps {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub budget: f64,
    pub destination: String,
    pub days: f64,
}

impl ComponentSchema for BudgetOptimizerProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct SeasonalRecommenderProps {
    pub destination: String,
}

impl ComponentSchema for SeasonalRecommenderProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct VisaRequirementCheckerProps {
    pub destination: String,
    pub nationality: Option<String>,
}

impl ComponentSchema for VisaRequirementCheckerProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct PackingListGeneratorProps {
    pub destination: String,
    pub days: f64,
    pub season: Option<String>,
}

impl ComponentSchema for PackingListGeneratorProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TravelBuddyMatcherProps {
    pub group_size: Option<f64>,
    pub trip_type: String,
}

impl ComponentSchema for TravelBuddyMatcherProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct FlightFinderProps {
    pub from: String,
    pub to: String,
    pub price: Option<String>,
    pub duration: Option<String>,
}

impl ComponentSchema for FlightFinderProps {}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HotelFinderProps {
    pub destination: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub guests: Option<f64>,
    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
}

impl ComponentSchema for HotelFinderProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct TransportComparisonProps {
    pub origin: String,
    pub destination: String,
    pub date: Option<String>,
}

impl ComponentSchema for TransportComparisonProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub passengers: Option<f64>,
    pub room_type: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmationProps {
    pub booking_type: BookingType,
    pub confirmation_number: String,
    pub details: BookingDetails,
    pub total_price: f64,
}

impl ComponentSchema for BookingConfirmationProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LocalGuideProps {
    pub nearby_spot: String,
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    pub distance: String,
}

impl ComponentSchema for LocalGuideProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherAlertsProps {
    pub location: String,
}

impl ComponentSchema for WeatherAlertsProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct DailyAgendaProps {
    pub location: String,
    pub date: Option<String>,
}

impl ComponentSchema for DailyAgendaProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct ExpenseTrackerProps {
    pub category: Option<String>,
    pub amount: Option<f64>,
}

impl ComponentSchema for ExpenseTrackerProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeTranslatorProps {
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub initial_text: Option<String>,
}

impl ComponentSchema for RealTimeTranslatorProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct LanguageHelperProps {
    pub language: String,
    pub category: Option<PhraseCategory>,
}

impl ComponentSchema for LanguageHelperProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct CurrencyConverterProps {
    pub from: String,
    pub to: String,
    pub amount: Option<f64>,
}

impl ComponentSchema for CurrencyConverterProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SharedExpense {
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SplitExpenseTrackerProps {
    pub travelers: Vec<String>,
    pub expenses: Option<Vec<SharedExpense>>,
}

impl ComponentSchema for SplitExpenseTrackerProps {}

#[derive(Debug, Deserialize, Clone)]
pub struct UpcomingEvent {
    pub title: String,
    pub time: String,
    #[serde(rename = "type")]
    pub event_type: BookingType,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TripDashboardProps {
    pub destination: String,
    pub trip_start_date: String,
    pub days_remaining: f64,
    pub upcoming_events: Vec<UpcomingEvent>,
}

impl ComponentSchema for TripDashboardProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyCrisisCardProps {
    pub emergency_type: EmergencyType,
    pub location: Option<String>,
}

impl ComponentSchema for EmergencyCrisisCardProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TripStatsProps {
    pub total_spent: String,
    pub top_category: String,
}

impl ComponentSchema for TripStatsProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TripJournalGeneratorProps {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub highlights: Vec<String>,
    pub total_expenses: f64,
}

impl ComponentSchema for TripJournalGeneratorProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PhotoGalleryOrganizerProps {
    pub destination: String,
    pub photo_count: Option<f64>,
}

impl ComponentSchema for PhotoGalleryOrganizerProps {}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TravelPreferences {
    pub dietary: Option<Vec<String>>,
    pub budget_level: Option<BudgetLevel>,
    pub pace_preference: Option<PacePreference>,
    pub crowd_tolerance: Option<CrowdTolerance>,
    pub interests: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreferenceCaptureProps {
    pub preferences: TravelPreferences,
}

impl ComponentSchema for PreferenceCaptureProps {}
