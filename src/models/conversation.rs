use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::rendered::RenderedComponent;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<RenderedComponent>,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            components: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, components: Vec<RenderedComponent>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            components,
            created_at: Utc::now(),
        }
    }
}

/// Flattens the trailing `limit` turns into `role: content` lines for the router prompt.
pub fn flatten_recent(turns: &[ConversationTurn], limit: usize) -> String {
    let start = turns.len().saturating_sub(limit);
    turns[start..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_keeps_only_trailing_turns() {
        let turns: Vec<ConversationTurn> = (0..7)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user(format!("q{}", i))
                } else {
                    ConversationTurn::assistant(format!("a{}", i), Vec::new())
                }
            })
            .collect();

        let context = flatten_recent(&turns, 5);
        assert_eq!(context, "user: q2\nassistant: a3\nuser: q4\nassistant: a5\nuser: q6");
    }

    #[test]
    fn test_flatten_empty_history() {
        assert_eq!(flatten_recent(&[], 5), "");
    }
}
