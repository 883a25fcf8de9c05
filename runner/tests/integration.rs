use fable::Parser;
use runner::{
    Captures, ScenarioOutcome, StepError, StepRole, StepSet, expect_eq, run_scenario, run_story,
};

#[derive(Default)]
struct SquareWorld {
    number: i64,
}

fn set_number(world: &mut SquareWorld, caps: &Captures<'_>) -> Result<(), StepError> {
    world.number = caps[1]
        .parse()
        .map_err(|e| StepError::Other(format!("bad number: {}", e)))?;
    Ok(())
}

fn square(world: &mut SquareWorld, _caps: &Captures<'_>) -> Result<(), StepError> {
    world.number *= world.number;
    Ok(())
}

fn check_result(world: &mut SquareWorld, caps: &Captures<'_>) -> Result<(), StepError> {
    let expected: i64 = caps[1]
        .parse()
        .map_err(|e| StepError::Other(format!("bad number: {}", e)))?;
    expect_eq(world.number, expected)
}

fn square_steps() -> StepSet<SquareWorld> {
    StepSet::new()
        .context(r"a number (\d+)", set_number)
        .expect("valid pattern")
        .event(r"I square it", square)
        .expect("valid pattern")
        .postcondition(r"I get (\d+)", check_result)
        .expect("valid pattern")
}

fn parse(source: &str) -> fable::Story {
    Parser::new("square.feature", source).parse().expect("parses")
}

#[test]
fn passing_story() {
    let story = parse(
        "Feature: Square\n    As a mathematician\n\nScenario: square of three\n    Given a number 3\n    When I square it\n    Then I get 9\n\nScenario: square of four\n    Given a number 4\n    When I square it\n    Then I get 16",
    );
    let report = run_story(&story, &square_steps());

    assert!(report.all_passed());
    assert_eq!(report.passed(), 2);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.scenarios[0].line, 4);
    assert_eq!(report.scenarios[1].line, 9);
    assert_eq!(report.title, "Square");
    assert_eq!(report.path, "square.feature");
}

#[test]
fn failing_assertion() {
    let story = parse(
        "Feature: Square\n  d\n  Scenario: wrong square\n    Given a number 3\n    When I square it\n    Then I get 8",
    );
    let outcome = run_scenario(&story.scenarios[0], &square_steps());

    assert_eq!(
        outcome,
        ScenarioOutcome::Failed {
            statement: "I get 8".to_string(),
            error: StepError::Assertion("9 != 8".to_string()),
        }
    );
}

#[test]
fn unmatched_statement() {
    let story = parse(
        "Feature: Square\n  d\n  Scenario: s\n    Given a color red\n    When I square it\n    Then I get 9",
    );
    let outcome = run_scenario(&story.scenarios[0], &square_steps());

    let ScenarioOutcome::Failed { statement, error } = outcome else {
        panic!("expected a failure");
    };
    assert_eq!(statement, "a color red");
    assert_eq!(
        error,
        StepError::NotFound {
            role: StepRole::Context,
            statement: "a color red".to_string(),
        }
    );
    assert_eq!(
        error.to_string(),
        "cannot find the context step corresponding to 'a color red'"
    );
}

#[test]
fn a_failure_never_stops_later_scenarios() {
    let story = parse(
        "Feature: Square\n    d\n\nScenario: wrong\n    Given a number 3\n    When I square it\n    Then I get 10\n\nScenario: right\n    Given a number 5\n    When I square it\n    Then I get 25",
    );
    let report = run_story(&story, &square_steps());

    assert!(!report.all_passed());
    assert_eq!(report.passed(), 1);
    assert_eq!(report.failed(), 1);
    assert!(!report.scenarios[0].passed());
    assert!(report.scenarios[1].passed());
}

#[test]
fn each_scenario_gets_a_fresh_world() {
    // Without a reset between scenarios the second one would start at 9.
    let story = parse(
        "Feature: Square\n    d\n\nScenario: three\n    Given a number 3\n    When I square it\n    Then I get 9\n\nScenario: zero\n    Given a number 0\n    When I square it\n    Then I get 0",
    );
    let report = run_story(&story, &square_steps());
    assert!(report.all_passed());
}

fn zero_number(world: &mut SquareWorld, _caps: &Captures<'_>) -> Result<(), StepError> {
    world.number = 0;
    Ok(())
}

#[test]
fn inherited_steps_resolve_first() {
    // The derived set registers a conflicting pattern, but the inherited
    // base tables are searched first, so the base handler wins.
    let derived = StepSet::new()
        .context(r"a number (\d+)", zero_number)
        .expect("valid pattern")
        .inherit(&square_steps());

    let story = parse(
        "Feature: Square\n  d\n  Scenario: s\n    Given a number 3\n    When I square it\n    Then I get 9",
    );
    let outcome = run_scenario(&story.scenarios[0], &derived);
    assert_eq!(outcome, ScenarioOutcome::Passed);
}

#[test]
fn resolve_matches_anywhere_in_the_statement() {
    let steps = square_steps();
    let (caps, _) = steps
        .resolve(StepRole::Context, "there is a number 42 here")
        .expect("matches");
    assert_eq!(&caps[1], "42");
}

#[test]
fn invalid_pattern_is_reported_at_registration() {
    let result = StepSet::<SquareWorld>::new().context(r"a number ((", set_number);
    assert!(result.is_err());
}
