use serde::Serialize;

use crate::models::chat::{ChatMessage, GroundingSource, Role};

/// The three independent conversation buffers. They share one session type
/// rather than three copies of the same request/history logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Grounded market lead search.
    Market,
    /// Page-embedded support expert.
    Support,
    /// Floating assistant bot.
    Assistant,
}

impl SessionKind {
    pub fn from_slug(slug: &str) -> Option<SessionKind> {
        match slug {
            "market" => Some(SessionKind::Market),
            "support" => Some(SessionKind::Support),
            "assistant" => Some(SessionKind::Assistant),
            _ => None,
        }
    }
}

const ASSISTANT_GREETING: &str = "Hello! I'm the E^3 Expert Bot. I can answer questions about \
    the engine, help you find features, or explain how matching works. How can I help you scale \
    your network today?";

/// Append-only chat history plus a per-session busy flag. Clearing one
/// session never touches the other two.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationSession {
    pub messages: Vec<ChatMessage>,
    pub busy: bool,
    #[serde(skip)]
    greeting: Option<&'static str>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The floating assistant opens with a canned greeting, restored on
    /// every clear.
    pub fn with_greeting() -> Self {
        let mut session = ConversationSession {
            greeting: Some(ASSISTANT_GREETING),
            ..Default::default()
        };
        session.clear();
        session
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::model(text));
    }

    pub fn push_model_with_sources(
        &mut self,
        text: impl Into<String>,
        sources: Vec<GroundingSource>,
    ) {
        self.messages.push(ChatMessage::model_with_sources(text, sources));
    }

    /// History turns to send to the model, as (role, text) pairs.
    pub fn history(&self) -> Vec<(Role, String)> {
        self.messages
            .iter()
            .map(|m| (m.role, m.text.clone()))
            .collect()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.busy = false;
        if let Some(greeting) = self.greeting {
            self.messages.push(ChatMessage::model(greeting));
        }
    }

    pub fn is_empty(&self) -> bool {
        match self.greeting {
            // A seeded session counts as empty while only the greeting remains.
            Some(_) => self.messages.len() <= 1,
            None => self.messages.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_are_append_only_and_clear_independently() {
        let mut market = ConversationSession::new();
        let mut support = ConversationSession::new();
        market.push_user("find welding employers");
        market.push_model("Here are three leads.");
        support.push_user("how do I export?");

        market.clear();
        assert!(market.messages.is_empty());
        assert_eq!(support.messages.len(), 1);
    }

    #[test]
    fn assistant_clear_restores_greeting() {
        let mut bot = ConversationSession::with_greeting();
        assert_eq!(bot.messages.len(), 1);
        assert!(bot.is_empty());

        bot.push_user("hi");
        bot.push_model("hello");
        assert!(!bot.is_empty());

        bot.clear();
        assert_eq!(bot.messages.len(), 1);
        assert_eq!(bot.messages[0].role, Role::Model);
        assert!(!bot.busy);
    }

    #[test]
    fn history_reflects_turn_order() {
        let mut session = ConversationSession::new();
        session.push_user("first");
        session.push_model("second");
        let history = session.history();
        assert_eq!(history[0], (Role::User, "first".to_string()));
        assert_eq!(history[1], (Role::Model, "second".to_string()));
    }

    #[test]
    fn session_slugs_resolve() {
        assert_eq!(SessionKind::from_slug("market"), Some(SessionKind::Market));
        assert_eq!(SessionKind::from_slug("assistant"), Some(SessionKind::Assistant));
        assert_eq!(SessionKind::from_slug("bogus"), None);
    }
}
