use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    NotFound,
    InvalidData,
    RenderFailed,
}

/// What the chat view draws for one routed component: the widget with its final
/// props, or an inline error card standing in for it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedComponent {
    Component {
        name: String,
        props: Value,
    },
    Placeholder {
        name: String,
        reason: PlaceholderReason,
        message: String,
    },
}

impl RenderedComponent {
    pub fn placeholder(name: &str, reason: PlaceholderReason) -> Self {
        let message = match reason {
            PlaceholderReason::NotFound => format!("Component not found: {}", name),
            PlaceholderReason::InvalidData => "Invalid component data".to_string(),
            PlaceholderReason::RenderFailed => format!("Failed to render {}", name),
        };

        RenderedComponent::Placeholder {
            name: name.to_string(),
            reason,
            message,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderedComponent::Placeholder { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            RenderedComponent::Component { name, .. } => name,
            RenderedComponent::Placeholder { name, .. } => name,
        }
    }
}
