pub mod config;
pub mod error;
pub mod state;
pub mod traits;
pub mod types;

pub use config::AppConfig;
pub use error::{DaytripError, Result};
pub use state::PlannerState;
pub use types::*;
