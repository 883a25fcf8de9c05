use std::borrow::Cow;

/// A raw source line stored in a block, de-indented to the block's level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Absolute 0-based line number in the source document.
    pub number: usize,
    /// Line text with this level's indentation prefix stripped.
    pub text: String,
}

/// A child of a block: either a raw line or a nested block.
#[derive(Debug, Clone)]
pub enum Node {
    Line(Line),
    Block(Block),
}

impl Node {
    /// 0-based line number where this child starts.
    pub fn start_at(&self) -> usize {
        match self {
            Node::Line(line) => line.number,
            Node::Block(block) => block.start_at(),
        }
    }

    /// Number of non-blank source lines covered by this child.
    pub fn nb_lines(&self) -> usize {
        match self {
            Node::Line(_) => 1,
            Node::Block(block) => block.nb_lines(),
        }
    }

    /// Flattened, de-indented text of this child.
    pub fn text(&self) -> String {
        match self {
            Node::Line(line) => line.text.clone(),
            Node::Block(block) => block.text(),
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Node::Line(_))
    }
}

/// A node in the indentation-derived parse tree.
///
/// A block is built from raw text by `Block::build`: lines at the block's
/// own indentation become `Node::Line` children, contiguous runs of deeper
/// lines become `Node::Block` children. The indentation marker is whatever
/// whitespace character the first indented line of a level uses; spaces and
/// tabs are never mixed within one level. Blocks are read-only once built;
/// parent and sibling relations are recomputed from the ordered child list
/// rather than stored.
#[derive(Debug, Clone)]
pub struct Block {
    start_at: usize,
    indentation: String,
    children: Vec<Node>,
}

impl Block {
    /// Build a hierarchy of blocks from the given content.
    ///
    /// Blank lines produce no child and do not count toward `nb_lines`.
    /// Empty content yields a block with zero children.
    pub fn build(content: &str) -> Block {
        let lines: Vec<&str> = content.lines().collect();
        let (block, _) = build_level(&lines, 0, String::new());
        block
    }

    /// Assemble a block directly from existing children.
    /// Used by the story extractor to pair a scenario title line with its body.
    pub(crate) fn from_children(children: Vec<Node>) -> Block {
        let start_at = children.first().map(Node::start_at).unwrap_or(0);
        Block {
            start_at,
            indentation: String::new(),
            children,
        }
    }

    /// 0-based line number where this block starts.
    pub fn start_at(&self) -> usize {
        self.start_at
    }

    /// 0-based line number just past the block's last counted line.
    pub fn end_at(&self) -> usize {
        self.start_at + self.nb_lines()
    }

    /// The indentation prefix shared by this block's immediate lines.
    pub fn indentation(&self) -> &str {
        &self.indentation
    }

    /// Immediate child count (lines and sub-blocks, non-recursive).
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Recursive line count: each line child counts one, each sub-block
    /// contributes its own `nb_lines`.
    pub fn nb_lines(&self) -> usize {
        self.children.iter().map(Node::nb_lines).sum()
    }

    /// Raw children in document order, lines and blocks intermixed.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    /// Positional lookup. A stored sub-block is returned as-is; a raw line
    /// is wrapped in a transient single-line block starting at that line.
    pub fn get(&self, index: usize) -> Option<Cow<'_, Block>> {
        match self.children.get(index)? {
            Node::Block(block) => Some(Cow::Borrowed(block)),
            Node::Line(line) => Some(Cow::Owned(Block {
                start_at: line.number,
                indentation: self.indentation.clone(),
                children: vec![Node::Line(line.clone())],
            })),
        }
    }

    /// Flattened, de-indented, newline-joined text of the whole block.
    pub fn text(&self) -> String {
        let parts: Vec<String> = self.children.iter().map(Node::text).collect();
        parts.join("\n")
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

/// Blocks compare by flattened text, ignoring indentation and line numbers.
impl PartialEq for Block {
    fn eq(&self, other: &Block) -> bool {
        self.text() == other.text()
    }
}

impl PartialEq<str> for Block {
    fn eq(&self, other: &str) -> bool {
        self.text() == other
    }
}

impl PartialEq<&str> for Block {
    fn eq(&self, other: &&str) -> bool {
        self.text() == *other
    }
}

/// Build one level of the tree. `lines` is the whole document; `start` is
/// the index of the first line to consider. Returns the block and the index
/// of the first line it did not consume.
fn build_level(lines: &[&str], start: usize, indentation: String) -> (Block, usize) {
    let mut children = Vec::new();
    let mut i = start;

    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        let line_indentation = leading_indentation(line, &indentation);
        if line_indentation == indentation {
            children.push(Node::Line(Line {
                number: i,
                text: line[indentation.len()..].to_string(),
            }));
            i += 1;
        } else if line_indentation.len() > indentation.len() {
            let (sub_block, next) = build_level(lines, i, line_indentation);
            children.push(Node::Block(sub_block));
            i = next;
        } else {
            // Shallower, or indented with a different whitespace symbol:
            // this level ends and the caller resumes at its own level.
            break;
        }
    }

    (
        Block {
            start_at: start,
            indentation,
            children,
        },
        i,
    )
}

/// The leading indentation of `line`, as a run of this level's indentation
/// symbol. At an unindented level the symbol is fixed by the line itself
/// (tab or space); a line starting with any other character has zero
/// indentation.
fn leading_indentation(line: &str, indentation: &str) -> String {
    let symbol = match indentation.chars().next() {
        Some(c) => c,
        None => match line.chars().next() {
            Some(c @ (' ' | '\t')) => c,
            _ => return String::new(),
        },
    };

    let count = line.chars().take_while(|&c| c == symbol).count();
    symbol.to_string().repeat(count)
}
