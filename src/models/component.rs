pub mod props;

use serde::Serialize;
use serde_json::Value;
use std::{fmt, str::FromStr};

use crate::models::route_decision::RegistryEntry;
use props::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub component: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(kind: ComponentKind, message: impl Into<String>) -> Self {
        Self {
            component: kind.name(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid props for {}: {}", self.component, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownComponent(pub String);

impl fmt::Display for UnknownComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown component: {}", self.0)
    }
}

impl std::error::Error for UnknownComponent {}

fn parse_props<T: ComponentSchema>(kind: ComponentKind, props: &Value) -> Result<T, ValidationError> {
    let parsed: T =
        serde_json::from_value(props.clone()).map_err(|e| ValidationError::new(kind, e.to_string()))?;
    parsed.check().map_err(|msg| ValidationError::new(kind, msg))?;
    Ok(parsed)
}

macro_rules! component_catalogue {
    ($($variant:ident($props:ty) => $description:expr;)+) => {
        /// Every widget the chat can surface.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ComponentKind {
            $($variant,)+
        }

        /// Props that passed the schema of their component.
        #[derive(Debug, Clone)]
        pub enum ComponentProps {
            $($variant($props),)+
        }

        impl ComponentKind {
            pub const ALL: &'static [ComponentKind] = &[$(ComponentKind::$variant,)+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(ComponentKind::$variant => stringify!($variant),)+
                }
            }

            /// Trigger text that teaches the router when to pick this component.
            pub fn description(&self) -> &'static str {
                match self {
                    $(ComponentKind::$variant => $description,)+
                }
            }

            pub fn validate(&self, props: &Value) -> Result<ComponentProps, ValidationError> {
                if !props.is_object() {
                    return Err(ValidationError::new(*self, "props must be an object"));
                }
                match self {
                    $(ComponentKind::$variant => {
                        parse_props::<$props>(*self, props).map(ComponentProps::$variant)
                    })+
                }
            }
        }

        impl FromStr for ComponentKind {
            type Err = UnknownComponent;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name {
                    $(stringify!($variant) => Ok(ComponentKind::$variant),)+
                    other => Err(UnknownComponent(other.to_string())),
                }
            }
        }

        impl ComponentProps {
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $(ComponentProps::$variant(_) => ComponentKind::$variant,)+
                }
            }
        }
    };
}

component_catalogue! {
    WorldMapExplorer(WorldMapExplorerProps) =>
        "Interactive world map showing popular destinations. Use on INITIAL welcome or when user asks to explore destinations without a specific place in mind.";
    SmartItineraryPlanner(SmartItineraryPlannerProps) =>
        "CRITICAL TRIGGER: Use ONLY when user provides ALL THREE: (1) budget amount, (2) number of days, AND (3) specific destination in ONE message. Examples that SHOULD trigger: \"I have $2000 for 7 days in Japan\", \"Plan 5 days in Paris with $1500\", \"10 day Italy trip, budget $3000\". Creates comprehensive day-by-day itinerary with budget breakdown, activity suggestions, and travel style optimization.";
    DestinationExplorer(DestinationExplorerProps) =>
        "Use during initial PLANNING phase when user asks broad questions about destinations. Triggers: \"where should I go\", \"travel ideas\", \"best places to visit\", \"recommend destinations\"";
    BudgetOptimizer(BudgetOptimizerProps) =>
        "Interactive budget allocation tool. Triggers: \"optimize my budget\", \"how should I split $2000\", \"adjust my spending\", \"redistribute budget\"";
    SeasonalRecommender(SeasonalRecommenderProps) =>
        "Shows best months to visit with weather, crowds, pricing. Triggers: \"when should I visit\", \"best time to go to\", \"what month is best\"";
    VisaRequirementChecker(VisaRequirementCheckerProps) =>
        "Visa requirements and documentation. Triggers: \"do I need a visa\", \"visa requirements\", \"travel documents\"";
    PackingListGenerator(PackingListGeneratorProps) =>
        "Smart packing checklist. Triggers: \"what should I pack\", \"packing list\", \"what to bring\"";
    TravelBuddyMatcher(TravelBuddyMatcherProps) =>
        "Group trip coordination. Use when user mentions GROUP travel. Triggers: \"my friends and I\", \"group trip\", \"we are planning\", \"family vacation\"";
    FlightFinder(FlightFinderProps) =>
        "Flight search during BOOKING phase. Triggers: \"find flights\", \"flight prices\", \"book tickets\", \"flights to\"";
    HotelFinder(HotelFinderProps) =>
        "Hotel search during BOOKING phase. Triggers: \"find hotels\", \"where to stay\", \"accommodation\", \"book hotel\"";
    TransportComparison(TransportComparisonProps) =>
        "Compare transport options between cities. Triggers: \"how to get from X to Y\", \"train vs flight\", \"transportation options\"";
    BookingConfirmation(BookingConfirmationProps) =>
        "Show booking confirmation details. Used when displaying reservation confirmation.";
    LocalGuide(LocalGuideProps) =>
        "Nearby recommendations. Use when user is CURRENTLY at destination. Triggers: \"I am in [city] now\", \"where should I eat here\", \"what to see nearby\"";
    WeatherAlerts(WeatherAlertsProps) =>
        "Real-time weather forecast. Triggers: \"what's the weather\", \"will it rain\", \"temperature\"";
    DailyAgenda(DailyAgendaProps) =>
        "Today's itinerary with timeline. Triggers: \"what's my plan today\", \"today's schedule\", \"what's next\"";
    ExpenseTracker(ExpenseTrackerProps) =>
        "Quick expense logging. Triggers: \"I spent $50\", \"log expense\", \"track spending\", \"add expense\"";
    RealTimeTranslator(RealTimeTranslatorProps) =>
        "Live translation. Triggers: \"translate\", \"how do I say\", \"what does X mean\"";
    LanguageHelper(LanguageHelperProps) =>
        "Common phrases with pronunciation. Triggers: \"common phrases in Japanese\", \"basic words\", \"useful expressions\"";
    CurrencyConverter(CurrencyConverterProps) =>
        "Currency exchange rates. Triggers: \"convert currency\", \"exchange rate\", \"how much is X in Y\"";
    SplitExpenseTracker(SplitExpenseTrackerProps) =>
        "Group expense splitting. Triggers: \"split bills\", \"track group expenses\", \"who owes what\"";
    TripDashboard(TripDashboardProps) =>
        "Trip overview dashboard. Triggers: \"trip overview\", \"my schedule today\", \"trip status\"";
    EmergencyCrisisCard(EmergencyCrisisCardProps) =>
        "CRITICAL EMERGENCY. Detect: lost passport, missed flight, medical, theft. Provides emergency protocols and contacts. HIGH PRIORITY.";
    TripStats(TripStatsProps) =>
        "Post-trip analytics. Triggers: \"trip summary\", \"how much did I spend\", \"trip statistics\"";
    TripJournalGenerator(TripJournalGeneratorProps) =>
        "Beautiful trip summary. Use when trip is COMPLETED. Triggers: \"I'm back\", \"trip is over\", \"create trip journal\"";
    PhotoGalleryOrganizer(PhotoGalleryOrganizerProps) =>
        "Organize trip photos. Triggers: \"organize my photos\", \"photo gallery\", \"trip memories\"";
    PreferenceCapture(PreferenceCaptureProps) =>
        "SILENT component that captures user preferences for personalization. Activate when user mentions dietary restrictions, budget preferences, travel pace, or interests.";
}

/// Second-stage generation a component can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisKind {
    Itinerary,
    Hotels,
}

impl ComponentKind {
    pub fn synthesis(&self) -> Option<SynthesisKind> {
        match self {
            ComponentKind::SmartItineraryPlanner => Some(SynthesisKind::Itinerary),
            ComponentKind::HotelFinder => Some(SynthesisKind::Hotels),
            _ => None,
        }
    }

    /// Itineraries are only generated when the router asks for it; hotel lists
    /// are always generated because the router rarely sets the flag for them.
    pub fn wants_synthesis(&self, needs_generation: bool) -> Option<SynthesisKind> {
        match self.synthesis()? {
            SynthesisKind::Itinerary if !needs_generation => None,
            kind => Some(kind),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentDescriptor {
    #[serde(skip)]
    pub kind: ComponentKind,
    pub name: &'static str,
    pub description: &'static str,
}

/// The static catalogue, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    descriptors: Vec<ComponentDescriptor>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        let descriptors = ComponentKind::ALL
            .iter()
            .map(|kind| ComponentDescriptor {
                kind: *kind,
                name: kind.name(),
                description: kind.description(),
            })
            .collect();

        Self { descriptors }
    }

    pub fn descriptors(&self) -> &[ComponentDescriptor] {
        &self.descriptors
    }

    pub fn lookup(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn entries(&self) -> Vec<RegistryEntry> {
        self.descriptors
            .iter()
            .map(|d| RegistryEntry {
                name: d.name.to_string(),
                description: d.description.to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
