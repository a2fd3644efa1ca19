//! The day-trip planner: city -> interests -> itinerary.

pub mod steps;

use std::sync::Arc;

use daytrip_core::error::Result;
use daytrip_core::traits::{Console, TextGenerator};
use daytrip_core::types::GenerationRequest;
use daytrip_core::PlannerState;

use crate::graph::{CompiledWorkflow, WorkflowBuilder, END};

pub use steps::{CityInput, CreateItinerary, InterestsInput};

pub const CITY_INPUT: &str = "city_input";
pub const INTERESTS_INPUT: &str = "interests_input";
pub const CREATE_ITINERARY: &str = "create_itinerary";

pub const CITY_PROMPT: &str = "Please enter the city you want to visit for your day trip: ";
pub const ITINERARY_INSTRUCTION: &str = "Create an itinerary for my day trip.";

pub fn interests_prompt(city: &str) -> String {
    format!(
        "Please enter your interests for the trip to {} (comma-separated): ",
        city
    )
}

/// Split a comma-separated line into trimmed tokens.
///
/// Permissive: empty and repeated tokens are kept, so `""` yields `[""]`.
pub fn parse_interests(line: &str) -> Vec<String> {
    line.split(',').map(|s| s.trim().to_string()).collect()
}

/// The request sent to the text-generation service for a given city and
/// interests.
pub fn itinerary_request(city: &str, interests: &[String]) -> GenerationRequest {
    GenerationRequest::new(
        format!(
            "Create a day-trip itinerary for {} based on interests: {}.",
            city,
            interests.join(", ")
        ),
        ITINERARY_INSTRUCTION,
    )
}

/// Wire the three planner steps into a compiled chain.
pub fn build_planner(
    console: Arc<dyn Console>,
    generator: Arc<dyn TextGenerator>,
) -> Result<CompiledWorkflow<PlannerState>> {
    let mut builder = WorkflowBuilder::new();
    builder
        .register(CITY_INPUT, CityInput::new(console.clone()))?
        .register(INTERESTS_INPUT, InterestsInput::new(console))?
        .register(CREATE_ITINERARY, CreateItinerary::new(generator))?
        .set_entry(CITY_INPUT)?
        .connect(CITY_INPUT, INTERESTS_INPUT)?
        .connect(INTERESTS_INPUT, CREATE_ITINERARY)?
        .connect(CREATE_ITINERARY, END)?;
    builder.compile()
}
