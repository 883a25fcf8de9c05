use std::path::Path;

use serde::Serialize;

/// One example within a story: ordered contexts, exactly one event, and
/// one or more postconditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub title: String,
    /// Precondition statements ("Given" / "And"), at least one.
    pub contexts: Vec<String>,
    /// The single action statement ("When").
    pub event: String,
    /// Expected-outcome statements ("Then" / "And"), at least one.
    pub postconditions: Vec<String>,
    /// 0-based line of the scenario title in the source document.
    pub start_at: usize,
    /// Path of the owning story, stamped when the scenario is attached.
    pub path: String,
}

/// A parsed story document: one feature with its scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Story {
    pub path: String,
    pub title: String,
    pub description: String,
    pub scenarios: Vec<Scenario>,
}

impl Story {
    pub fn new(path: impl Into<String>) -> Story {
        Story {
            path: path.into(),
            title: String::new(),
            description: String::new(),
            scenarios: Vec::new(),
        }
    }

    /// The file part of the story path.
    pub fn name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.path)
    }

    /// Append a scenario, stamping it with this story's path.
    pub fn add_scenario(&mut self, mut scenario: Scenario) {
        scenario.path = self.path.clone();
        self.scenarios.push(scenario);
    }
}
