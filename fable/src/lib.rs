pub mod block;
pub mod keyword;
pub mod parser;
pub mod story;

pub use parser::{Parser, SyntaxError, SyntaxErrorKind};
pub use story::{Scenario, Story};
