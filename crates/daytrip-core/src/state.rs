use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// Default first turn of a planning conversation.
pub const DEFAULT_OPENING: &str = "I want to plan a day trip.";

/// State threaded through the planner workflow.
///
/// Fields are private: the only way to change a state is one of the
/// consuming `with_*` transitions, each of which appends exactly one
/// message, so `messages` can only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerState {
    messages: Vec<ChatMessage>,
    city: String,
    interests: Vec<String>,
    itinerary: String,
}

impl PlannerState {
    /// Start a conversation with a single user turn.
    pub fn new(opening: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(opening)],
            ..Self::default()
        }
    }

    /// Build a state from an existing transcript and nothing else collected.
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn itinerary(&self) -> &str {
        &self.itinerary
    }

    /// Record the chosen city, keeping the raw text as a user turn.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        let city = city.into();
        self.messages.push(ChatMessage::user(city.clone()));
        Self { city, ..self }
    }

    /// Record parsed interests alongside the raw line they came from.
    pub fn with_interests(mut self, raw: impl Into<String>, interests: Vec<String>) -> Self {
        self.messages.push(ChatMessage::user(raw));
        Self { interests, ..self }
    }

    /// Record the generated itinerary as an assistant turn.
    pub fn with_itinerary(mut self, itinerary: impl Into<String>) -> Self {
        let itinerary = itinerary.into();
        self.messages.push(ChatMessage::assistant(itinerary.clone()));
        Self { itinerary, ..self }
    }
}
