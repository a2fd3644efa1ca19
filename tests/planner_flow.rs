use std::sync::Arc;

use daytrip_agent::planner::{build_planner, CITY_INPUT, CREATE_ITINERARY, INTERESTS_INPUT};
use daytrip_agent::LineConsole;
use daytrip_core::error::DaytripError;
use daytrip_core::types::Role;
use daytrip_core::PlannerState;
use daytrip_test_utils::{ScriptedConsole, ScriptedGenerator};

#[tokio::test]
async fn test_day_trip_scenario() {
    let console = Arc::new(ScriptedConsole::new(&["paris", "food"]));
    let generator = Arc::new(ScriptedGenerator::replying("<itinerary text>"));
    let workflow = build_planner(console, generator).expect("compile planner");

    let initial = PlannerState::new("I want to plan a day trip.");
    let result = workflow.execute(initial).await.expect("run planner");

    let state = &result.state;
    assert_eq!(state.city(), "paris");
    assert_eq!(state.interests(), ["food"]);
    assert_eq!(state.itinerary(), "<itinerary text>");

    let transcript: Vec<(Role, &str)> = state
        .messages()
        .iter()
        .map(|m| (m.role, m.text()))
        .collect();
    assert_eq!(
        transcript,
        vec![
            (Role::User, "I want to plan a day trip."),
            (Role::User, "paris"),
            (Role::User, "food"),
            (Role::Assistant, "<itinerary text>"),
        ]
    );

    let executed: Vec<&str> = result.steps.iter().map(|s| s.step.as_str()).collect();
    assert_eq!(executed, vec![CITY_INPUT, INTERESTS_INPUT, CREATE_ITINERARY]);
}

#[tokio::test]
async fn test_scenario_over_line_console() {
    let console = Arc::new(LineConsole::new(
        "lisbon\ntrams,  pastries ,fado\n".as_bytes(),
        Vec::new(),
    ));
    let generator = Arc::new(ScriptedGenerator::replying("Ride tram 28."));
    let workflow = build_planner(console, generator.clone()).expect("compile planner");

    let state = workflow
        .run(PlannerState::new("I want to plan a day trip."))
        .await
        .expect("run planner");

    assert_eq!(state.city(), "lisbon");
    assert_eq!(state.interests(), ["trams", "pastries", "fado"]);
    assert_eq!(state.messages()[2].text(), "trams,  pastries ,fado");

    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].system,
        "Create a day-trip itinerary for lisbon based on interests: trams, pastries, fado."
    );
}

#[tokio::test]
async fn test_service_failure_surfaces_unchanged() {
    let console = Arc::new(ScriptedConsole::new(&["paris", "food"]));
    let generator = Arc::new(ScriptedGenerator::failing(DaytripError::LlmRequest(
        "HTTP 401 Unauthorized: invalid api key".into(),
    )));
    let workflow = build_planner(console, generator).expect("compile planner");

    let err = workflow
        .run(PlannerState::new("I want to plan a day trip."))
        .await
        .expect_err("run should fail");
    assert_eq!(
        err.to_string(),
        "LLM request failed: HTTP 401 Unauthorized: invalid api key"
    );
    assert!(!err.is_config());
}
