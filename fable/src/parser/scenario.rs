use crate::block::Block;
use crate::keyword::KeywordRegistry;
use crate::parser::error::SyntaxError;
use crate::parser::{lookup, match_keyword};
use crate::story::Scenario;

/// Extract one scenario from a block whose first child is the title line
/// and whose second child is the body sub-block.
///
/// Extraction runs in fixed order: title, contexts, event, postconditions.
/// The returned scenario has no story path yet; the story stamps it on
/// attachment.
pub(crate) fn parse(
    path: &str,
    block: &Block,
    registry: &KeywordRegistry,
    symbol: &str,
) -> Result<Scenario, SyntaxError> {
    let title_node = match block.children().first() {
        Some(node) => node,
        None => {
            return Err(SyntaxError::structure(
                path,
                block.start_at() + 1,
                "the scenario block is empty",
            ));
        }
    };
    let title_line = title_node.start_at() + 1;
    let title_keyword = lookup(registry, "scenario.title", path, title_line)?;
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

    let body = block.get(1).ok_or_else(|| {
        SyntaxError::structure(path, title_line, "the scenario doesn't have a body")
    })?;

    let given = lookup(registry, "scenario.given", path, title_line)?;
    let and = lookup(registry, "scenario.and", path, title_line)?;
    let when = lookup(registry, "scenario.when", path, title_line)?;
    let then = lookup(registry, "scenario.then", path, title_line)?;

    // Contexts: the first body line must be a 'given'; following 'and'
    // lines continue the list. The first non-matching line is left in
    // place as the event line, without failing.
    let first = match body.children().first() {
        Some(node) => node,
        None => {
            return Err(SyntaxError::missing_keyword(
                path,
                body.start_at() + 1,
                given,
                symbol,
            ));
        }
    };
    let first_line = first.start_at() + 1;
    let mut contexts = match match_keyword(given, symbol, &first.text(), path, first_line)? {
        Some(context) => vec![context],
        None => return Err(SyntaxError::missing_keyword(path, first_line, given, symbol)),
    };

    let mut index = 1;
    while let Some(node) = body.children().get(index) {
        let line = node.start_at() + 1;
        match match_keyword(and, symbol, &node.text(), path, line)? {
            Some(context) => {
                contexts.push(context);
                index += 1;
            }
            None => break,
        }
    }

    // Event: exactly one 'when' line right after the contexts.
    let event = match body.children().get(index) {
        Some(node) => {
            let line = node.start_at() + 1;
            match match_keyword(when, symbol, &node.text(), path, line)? {
                Some(event) => event,
                None => return Err(SyntaxError::missing_keyword(path, line, when, symbol)),
            }
        }
        None => {
            return Err(SyntaxError::missing_keyword(
                path,
                body.end_at(),
                when,
                symbol,
            ));
        }
    };
    index += 1;

    // Postconditions: a 'then' line, continued by 'and' lines. The
    // postcondition list must run to the end of the body; unlike contexts,
    // a trailing line that is not an 'and' is an error here.
    let first_condition = match body.children().get(index) {
        Some(node) => {
            let line = node.start_at() + 1;
            match match_keyword(then, symbol, &node.text(), path, line)? {
                Some(condition) => condition,
                None => return Err(SyntaxError::missing_keyword(path, line, then, symbol)),
            }
        }
        None => {
            return Err(SyntaxError::missing_keyword(
                path,
                body.end_at(),
                then,
                symbol,
            ));
        }
    };
    index += 1;

    let mut postconditions = vec![first_condition];
    while let Some(node) = body.children().get(index) {
        let line = node.start_at() + 1;
        match match_keyword(and, symbol, &node.text(), path, line)? {
            Some(condition) => {
                postconditions.push(condition);
                index += 1;
            }
            None => return Err(SyntaxError::missing_keyword(path, line, and, symbol)),
        }
    }

    Ok(Scenario {
        title,
        contexts,
        event,
        postconditions,
        start_at: block.start_at(),
        path: String::new(),
    })
}
