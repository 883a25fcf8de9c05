pub mod error;
pub mod report;
pub mod runner;
pub mod steps;

pub use error::{StepError, StepRole, expect, expect_eq};
pub use report::{ScenarioOutcome, ScenarioReport, StoryReport};
pub use runner::{run_scenario, run_story};
pub use steps::{Captures, StepFn, StepSet};
