use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Trip setup captured on the landing form and handed to the chat once.
#[serde_as]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    pub destination: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub days: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub budget: f64,
    pub currency: Option<String>,
    pub theme: Option<String>,
}

impl TripDetails {
    pub fn currency_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(default)
    }

    /// Opening request sent on behalf of the user when a chat starts.
    pub fn opening_request(&self, default_currency: &str) -> String {
        let symbol = currency_symbol(self.currency_or(default_currency));
        format!(
            "I want to visit {} for {} days with a budget of {}{}",
            self.destination,
            self.days,
            symbol,
            format_amount(self.budget)
        )
    }
}

/// Display symbol for an ISO currency code. Unknown codes render as "XYZ ".
pub fn currency_symbol(code: &str) -> String {
    let symbol = match code.trim().to_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "INR" => "₹",
        "JPY" => "¥",
        "AUD" => "A$",
        "CAD" => "C$",
        "SGD" => "S$",
        "AED" => "د.إ",
        "THB" => "฿",
        other => return format!("{} ", other),
    };
    symbol.to_string()
}

pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}
