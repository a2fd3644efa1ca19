//! Workflow executor: a linear chain of named steps threading one state value.
//!
//! Steps are registered on a `WorkflowBuilder`, connected one-to-one (each
//! step has exactly one successor, either another step or `END`), and
//! compiled into a `CompiledWorkflow` whose transitions are table indices.
//! Running the workflow feeds each step's output state into the next step.

pub mod builder;
pub mod executor;
pub mod step;

pub use builder::{WorkflowBuilder, END};
pub use executor::{CompiledWorkflow, ExecutionResult, StepRecord};
pub use step::{FnStep, Step};
