use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, info};

use daytrip_core::error::Result;
use daytrip_core::traits::{Console, TextGenerator};
use daytrip_core::PlannerState;

use super::{interests_prompt, itinerary_request, parse_interests, CITY_PROMPT};
use crate::graph::Step;

/// Reads the destination city.
pub struct CityInput {
    console: Arc<dyn Console>,
}

impl CityInput {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }
}

impl Step<PlannerState> for CityInput {
    fn run(&self, state: PlannerState) -> BoxFuture<'_, Result<PlannerState>> {
        Box::pin(async move {
            let city = self.console.prompt_line(CITY_PROMPT).await?;
            debug!(city = %city, "City entered");
            Ok(state.with_city(city))
        })
    }
}

/// Reads a comma-separated list of interests.
pub struct InterestsInput {
    console: Arc<dyn Console>,
}

impl InterestsInput {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }
}

impl Step<PlannerState> for InterestsInput {
    fn run(&self, state: PlannerState) -> BoxFuture<'_, Result<PlannerState>> {
        Box::pin(async move {
            let line = self
                .console
                .prompt_line(&interests_prompt(state.city()))
                .await?;
            let interests = parse_interests(&line);
            debug!(count = interests.len(), "Interests entered");
            Ok(state.with_interests(line, interests))
        })
    }
}

/// Asks the text-generation service for the itinerary.
pub struct CreateItinerary {
    generator: Arc<dyn TextGenerator>,
}

impl CreateItinerary {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

impl Step<PlannerState> for CreateItinerary {
    fn run(&self, state: PlannerState) -> BoxFuture<'_, Result<PlannerState>> {
        Box::pin(async move {
            info!(city = %state.city(), interests = ?state.interests(), "Creating itinerary");
            let request = itinerary_request(state.city(), state.interests());
            let itinerary = self.generator.generate(request).await?;
            Ok(state.with_itinerary(itinerary))
        })
    }
}
