use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Web citation attached to a grounded assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// One turn in a conversation session. Sources only ever appear on model
/// messages from the market-search session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<GroundingSource>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::Model,
            text: text.into(),
            sources: Vec::new(),
        }
    }

    pub fn model_with_sources(text: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        ChatMessage {
            role: Role::Model,
            text: text.into(),
            sources,
        }
    }
}
