use fable::keyword::{Keyword, KeywordRegistry};
use fable::{Parser, SyntaxErrorKind};

#[test]
fn nested_document() {
    let source = "Feature: Square\n  As a mathematician\n  Scenario: square of three\n    Given a number 3\n    When I square it\n    Then I get 9";
    let story = Parser::new("square.feature", source).parse().expect("parses");

    assert_eq!(story.title, "Square");
    assert_eq!(story.description, "As a mathematician");
    assert_eq!(story.scenarios.len(), 1);

    let scenario = &story.scenarios[0];
    assert_eq!(scenario.title, "square of three");
    assert_eq!(scenario.contexts, vec!["a number 3"]);
    assert_eq!(scenario.event, "I square it");
    assert_eq!(scenario.postconditions, vec!["I get 9"]);
    assert_eq!(scenario.start_at, 2);
}

#[test]
fn flat_document_with_multi_line_description() {
    let source = "Feature: Square\n    In order to compute areas\n    As a mathematician\n\nScenario: square of three\n    Given a number 3\n    When I square it\n    Then I get 9\n\nScenario: square of four\n    Given a number 4\n    When I square it\n    Then I get 16";
    let story = Parser::new("square.feature", source).parse().expect("parses");

    assert_eq!(story.title, "Square");
    assert_eq!(
        story.description,
        "In order to compute areas\nAs a mathematician"
    );
    assert_eq!(story.scenarios.len(), 2);
    assert_eq!(story.scenarios[0].title, "square of three");
    assert_eq!(story.scenarios[0].start_at, 4);
    assert_eq!(story.scenarios[1].title, "square of four");
    assert_eq!(story.scenarios[1].start_at, 9);
    assert_eq!(story.scenarios[1].contexts, vec!["a number 4"]);
    assert_eq!(story.scenarios[1].postconditions, vec!["I get 16"]);
}

#[test]
fn tab_indented_document() {
    let source = "Feature: F\n\tthe description\n\nScenario: s\n\tGiven a\n\tWhen b\n\tThen c";
    let story = Parser::new("f.feature", source).parse().expect("parses");
    assert_eq!(story.description, "the description");
    assert_eq!(story.scenarios[0].start_at, 3);
    assert_eq!(story.scenarios[0].contexts, vec!["a"]);
}

#[test]
fn and_lines_extend_contexts_and_postconditions() {
    let source = "Feature: F\n  d\n  Scenario: s\n    Given a\n    And cont1\n    And cont2\n    When e\n    Then t\n    And more";
    let story = Parser::new("f.feature", source).parse().expect("parses");

    let scenario = &story.scenarios[0];
    assert_eq!(scenario.contexts, vec!["a", "cont1", "cont2"]);
    assert_eq!(scenario.event, "e");
    assert_eq!(scenario.postconditions, vec!["t", "more"]);
}

#[test]
fn scenario_paths_are_stamped() {
    let source = "Feature: F\n  d\n  Scenario: s\n    Given a\n    When b\n    Then c";
    let story = Parser::new("features/square.feature", source)
        .parse()
        .expect("parses");
    assert_eq!(story.path, "features/square.feature");
    assert_eq!(story.name(), "square.feature");
    assert_eq!(story.scenarios[0].path, "features/square.feature");
}

#[test]
fn empty_file_is_rejected() {
    let error = Parser::new("e.feature", "").parse().expect_err("must fail");
    assert_eq!(error.kind, SyntaxErrorKind::EmptyFile);
    assert_eq!(error.line, 1);
    assert_eq!(
        error.to_string(),
        "File 'e.feature', line 1: the story file is empty"
    );

    let error = Parser::new("e.feature", "  \n\n\t ")
        .parse()
        .expect_err("blank lines only must fail");
    assert_eq!(error.kind, SyntaxErrorKind::EmptyFile);
}

#[test]
fn missing_story_title() {
    let source = "Scenario: s\n    Given a\n    When b\n    Then c";
    let error = Parser::new("f.feature", source).parse().expect_err("must fail");
    assert_eq!(error.line, 1);
    assert_eq!(
        error.kind,
        SyntaxErrorKind::MissingKeyword {
            keyword: "story.title".to_string(),
            expected: "feature:".to_string(),
        }
    );
}

#[test]
fn missing_description() {
    let error = Parser::new("f.feature", "Feature: F")
        .parse()
        .expect_err("must fail");
    assert_eq!(error.line, 1);
    assert_eq!(
        error.kind,
        SyntaxErrorKind::Structure("the description couldn't be read".to_string())
    );
}

#[test]
fn missing_scenario_keyword() {
    let source = "Feature: F\n    d\n\nBanana: s\n    Given a\n    When b\n    Then c";
    let error = Parser::new("f.feature", source).parse().expect_err("must fail");
    assert_eq!(error.line, 4);
    assert_eq!(
        error.kind,
        SyntaxErrorKind::MissingKeyword {
            keyword: "scenario.title".to_string(),
            expected: "scenario:".to_string(),
        }
    );
}

#[test]
fn dangling_scenario_title() {
    let source = "Feature: F\n    d\n\nScenario: s";
    let error = Parser::new("f.feature", source).parse().expect_err("must fail");
    assert_eq!(error.line, 4);
    assert_eq!(
        error.kind,
        SyntaxErrorKind::Structure(
            "the scenario title at the end of the file has no body".to_string()
        )
    );
}

#[test]
fn missing_event() {
    let source = "Feature: Square\n  As a mathematician\n  Scenario: square of three\n    Given a number 3\n    Then I get 9";
    let error = Parser::new("square.feature", source)
        .parse()
        .expect_err("must fail");
    assert_eq!(error.line, 5);
    assert_eq!(
        error.kind,
        SyntaxErrorKind::MissingKeyword {
            keyword: "scenario.when".to_string(),
            expected: "when".to_string(),
        }
    );
    assert_eq!(
        error.to_string(),
        "File 'square.feature', line 5: expecting the 'when' keyword"
    );
}

#[test]
fn context_run_stops_silently_at_a_non_and_line() {
    // The second 'Given' ends the context list; the failure is reported as
    // a missing event, not as a missing 'and'.
    let source = "Feature: F\n  d\n  Scenario: s\n    Given a\n    Given b";
    let error = Parser::new("f.feature", source).parse().expect_err("must fail");
    assert_eq!(error.line, 5);
    assert_eq!(
        error.kind,
        SyntaxErrorKind::MissingKeyword {
            keyword: "scenario.when".to_string(),
            expected: "when".to_string(),
        }
    );
}

#[test]
fn postcondition_run_must_fill_the_body() {
    // After 'Then', every remaining body line must be an 'and'.
    let source = "Feature: F\n  d\n  Scenario: s\n    Given a number 3\n    When I square it\n    Then I get 9\n    Given another";
    let error = Parser::new("f.feature", source).parse().expect_err("must fail");
    assert_eq!(error.line, 7);
    assert_eq!(
        error.kind,
        SyntaxErrorKind::MissingKeyword {
            keyword: "scenario.and".to_string(),
            expected: "and".to_string(),
        }
    );
}

#[test]
fn unknown_language_symbol() {
    let source = "Feature: F\n    d\nScenario: s\n    Given a\n    When b\n    Then c";
    let error = Parser::new("f.feature", source)
        .language("de")
        .parse()
        .expect_err("must fail");
    assert_eq!(error.line, 1);
    assert_eq!(
        error.kind,
        SyntaxErrorKind::UnknownLanguage {
            keyword: "story.title".to_string(),
            symbol: "de".to_string(),
        }
    );
}

fn french_registry() -> KeywordRegistry {
    let mut registry = KeywordRegistry::empty();
    registry.insert(Keyword::new("story.title").add_language("fr", &["fonctionnalité:"]));
    registry.insert(Keyword::new("scenario.title").add_language("fr", &["scénario:"]));
    registry.insert(Keyword::new("scenario.given").add_language("fr", &["étant donné"]));
    registry.insert(Keyword::new("scenario.when").add_language("fr", &["si"]));
    registry.insert(Keyword::new("scenario.then").add_language("fr", &["alors"]));
    registry.insert(Keyword::new("scenario.and").add_language("fr", &["et"]));
    registry
}

#[test]
fn custom_registry_parses_another_language() {
    let source = "Fonctionnalité: Carré\n    Pour calculer des aires\n\nScénario: le carré de trois\n    Étant donné un nombre 3\n    Si je le mets au carré\n    Alors j'obtiens 9";
    let registry = french_registry();
    let story = Parser::with_registry("carre.feature", source, &registry)
        .language("fr")
        .parse()
        .expect("parses");

    assert_eq!(story.title, "Carré");
    assert_eq!(story.description, "Pour calculer des aires");
    let scenario = &story.scenarios[0];
    assert_eq!(scenario.title, "le carré de trois");
    assert_eq!(scenario.contexts, vec!["un nombre 3"]);
    assert_eq!(scenario.event, "je le mets au carré");
    assert_eq!(scenario.postconditions, vec!["j'obtiens 9"]);
    assert_eq!(scenario.start_at, 3);
}
