use crate::block::{Block, Node};
use crate::keyword::KeywordRegistry;
use crate::parser::error::SyntaxError;
use crate::parser::{lookup, match_keyword, scenario};
use crate::story::Story;

/// State of the scenario pairing machine: scenario definitions arrive as a
/// title line followed by a body sub-block.
enum Pairing<'a> {
    AwaitingTitle,
    AwaitingBody(&'a Node),
}

/// Parse a whole story document: title, description, then scenarios.
pub(crate) fn parse(
    path: &str,
    content: &str,
    registry: &KeywordRegistry,
    symbol: &str,
) -> Result<Story, SyntaxError> {
    let block = Block::build(content);
    if block.is_empty() {
        return Err(SyntaxError::empty_file(path));
    }

    // The first line carries the story title.
    let title_node = &block.children()[0];
    let title_line = title_node.start_at() + 1;
    let title_keyword = lookup(registry, "story.title", path, title_line)?;
    let title = match match_keyword(title_keyword, symbol, &title_node.text(), path, title_line)? {
        Some(title) => title,
        None => {
            return Err(SyntaxError::missing_keyword(
                path,
                title_line,
                title_keyword,
                symbol,
            ));
        }
    };

    // A document may nest everything under the title in a single indented
    // region; in that shape the description and the scenario definitions
    // are the region's children rather than further top-level children. A
    // region of bare lines is a multi-line description, not a nested story.
    let rest: &[Node] = match block.children() {
        [_, Node::Block(body)] if body.children().iter().any(|node| !node.is_line()) => {
            body.children()
        }
        [_, rest @ ..] => rest,
        [] => unreachable!("emptiness checked above"),
    };

    // The description follows the title.
    let description = match rest.first() {
        Some(node) => node.text(),
        None => {
            return Err(SyntaxError::structure(
                path,
                title_line,
                "the description couldn't be read",
            ));
        }
    };

    let mut story = Story::new(path);
    story.title = title;
    story.description = description;

    // Remaining children alternate between a scenario title line and its
    // body sub-block; each completed pair becomes one scenario.
    let mut state = Pairing::AwaitingTitle;
    for node in &rest[1..] {
        match state {
            Pairing::AwaitingTitle => state = Pairing::AwaitingBody(node),
            Pairing::AwaitingBody(title) => {
                let combined = Block::from_children(vec![title.clone(), node.clone()]);
                let parsed = scenario::parse(path, &combined, registry, symbol)?;
                story.add_scenario(parsed);
                state = Pairing::AwaitingTitle;
            }
        }
    }

    if let Pairing::AwaitingBody(title) = state {
        return Err(SyntaxError::structure(
            path,
            title.start_at() + 1,
            "the scenario title at the end of the file has no body",
        ));
    }

    Ok(story)
}
