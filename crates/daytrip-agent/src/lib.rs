pub mod console;
pub mod generator;
pub mod graph;
pub mod planner;

pub use console::LineConsole;
pub use generator::LlmGenerator;
pub use graph::{CompiledWorkflow, ExecutionResult, FnStep, Step, StepRecord, WorkflowBuilder, END};
pub use planner::build_planner;
