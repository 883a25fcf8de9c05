use fable::story::{Scenario, Story};

use crate::error::StepRole;
use crate::report::{ScenarioOutcome, ScenarioReport, StoryReport};
use crate::steps::StepSet;

/// Run every scenario of a story against a step set.
///
/// Each scenario executes against a fresh `W::default()` world; a failing
/// scenario is recorded in the report and never stops the following ones.
pub fn run_story<W: Default>(story: &Story, steps: &StepSet<W>) -> StoryReport {
    let scenarios = story
        .scenarios
        .iter()
        .map(|scenario| ScenarioReport {
            title: scenario.title.clone(),
            line: scenario.start_at + 1,
            outcome: run_scenario(scenario, steps),
        })
        .collect();

    StoryReport {
        path: story.path.clone(),
        title: story.title.clone(),
        scenarios,
    }
}

/// Run one scenario: the contexts, then the event, then the postconditions.
/// Execution stops at the first failing statement.
pub fn run_scenario<W: Default>(scenario: &Scenario, steps: &StepSet<W>) -> ScenarioOutcome {
    let mut world = W::default();

    for context in &scenario.contexts {
        if let Err(error) = steps.run(StepRole::Context, context, &mut world) {
            return ScenarioOutcome::Failed {
                statement: context.clone(),
                error,
            };
        }
    }

    if let Err(error) = steps.run(StepRole::Event, &scenario.event, &mut world) {
        return ScenarioOutcome::Failed {
            statement: scenario.event.clone(),
            error,
        };
    }

    for postcondition in &scenario.postconditions {
        if let Err(error) = steps.run(StepRole::Postcondition, postcondition, &mut world) {
            return ScenarioOutcome::Failed {
                statement: postcondition.clone(),
                error,
            };
        }
    }

    ScenarioOutcome::Passed
}
