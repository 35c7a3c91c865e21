pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod matching;
pub mod planner;
pub mod progress;
pub mod report;
pub mod scanner;

pub use config::AppConfig;
pub use engine::{DriftEngine, DriftResult};
pub use error::Error;
pub use planner::ScanMode;
pub use progress::{ProgressReporter, SilentReporter};
