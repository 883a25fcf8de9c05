use crate::error::StepError;

/// Outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Passed,
    /// The scenario stopped at `statement` with `error`; later scenarios
    /// still run.
    Failed { statement: String, error: StepError },
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub title: String,
    /// 1-based source line of the scenario title.
    pub line: usize,
    pub outcome: ScenarioOutcome,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.outcome == ScenarioOutcome::Passed
    }
}

/// Results of running every scenario in one story.
#[derive(Debug, Clone)]
pub struct StoryReport {
    pub path: String,
    pub title: String,
    pub scenarios: Vec<ScenarioReport>,
}

impl StoryReport {
    pub fn passed(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.scenarios.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}
