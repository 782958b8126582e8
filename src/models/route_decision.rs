use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_ASSISTANT_MESSAGE: &str = "I'm here to help! What would you like to know?";

/// One component the router chose for this turn, with its draft props.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutedComponent {
    pub name: String,
    #[serde(default)]
    pub needs_generation: bool,
    #[serde(default = "empty_props", deserialize_with = "props_or_empty")]
    pub props: Value,
}

impl RoutedComponent {
    pub fn new(name: impl Into<String>, needs_generation: bool, props: Value) -> Self {
        Self {
            name: name.into(),
            needs_generation,
            props,
        }
    }

    /// Mutable view of the props object, replacing a non-object value with `{}`.
    pub fn props_mut(&mut self) -> &mut Map<String, Value> {
        if !self.props.is_object() {
            self.props = empty_props();
        }
        match &mut self.props {
            Value::Object(map) => map,
            _ => unreachable!("props was just normalised to an object"),
        }
    }
}

/// The per-turn output of the router.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RouteDecision {
    #[serde(default = "default_message", deserialize_with = "message_or_default")]
    pub message: String,
    #[serde(default, deserialize_with = "components_or_empty")]
    pub components: Vec<RoutedComponent>,
}

impl RouteDecision {
    pub fn conversational(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.trim().is_empty() {
                DEFAULT_ASSISTANT_MESSAGE.to_string()
            } else {
                message
            },
            components: Vec::new(),
        }
    }
}

/// Name and trigger text as sent to the router prompt.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RegistryEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

fn default_message() -> String {
    DEFAULT_ASSISTANT_MESSAGE.to_string()
}

fn empty_props() -> Value {
    Value::Object(Map::new())
}

fn props_or_empty<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => v,
        _ => empty_props(),
    })
}

fn message_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        _ => default_message(),
    })
}

/// Models sometimes emit `null` or a single object instead of a list.
fn components_or_empty<'de, D>(deserializer: D) -> Result<Vec<RoutedComponent>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(obj @ Value::Object(_)) => vec![obj],
        _ => Vec::new(),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RoutedComponent>(item) {
            Ok(component) => Some(component),
            Err(e) => {
                log::warn!("Dropping malformed component entry: {}", e);
                None
            }
        })
        .collect())
}
