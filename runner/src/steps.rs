use regex::Regex;

use crate::error::{StepError, StepRole};

pub use regex::Captures;

/// A step handler: runs against the scenario's world with the captures of
/// the pattern that matched the statement.
pub type StepFn<W> = fn(&mut W, &Captures<'_>) -> Result<(), StepError>;

/// Ordered pattern-to-handler tables for one step implementation.
///
/// A step set holds three tables, one per role. Registration is explicit
/// and happens once, at construction; resolution is a first-match search
/// in registration order. Per-scenario state lives in the world value `W`,
/// created fresh for every scenario.
pub struct StepSet<W> {
    contexts: Vec<(Regex, StepFn<W>)>,
    events: Vec<(Regex, StepFn<W>)>,
    postconditions: Vec<(Regex, StepFn<W>)>,
}

impl<W> Clone for StepSet<W> {
    fn clone(&self) -> Self {
        StepSet {
            contexts: self.contexts.clone(),
            events: self.events.clone(),
            postconditions: self.postconditions.clone(),
        }
    }
}

impl<W> Default for StepSet<W> {
    fn default() -> Self {
        StepSet::new()
    }
}

impl<W> StepSet<W> {
    pub fn new() -> StepSet<W> {
        StepSet {
            contexts: Vec::new(),
            events: Vec::new(),
            postconditions: Vec::new(),
        }
    }

    /// Register a context ("Given") pattern.
    pub fn context(mut self, pattern: &str, handler: StepFn<W>) -> Result<StepSet<W>, regex::Error> {
        self.contexts.push((Regex::new(pattern)?, handler));
        Ok(self)
    }

    /// Register an event ("When") pattern.
    pub fn event(mut self, pattern: &str, handler: StepFn<W>) -> Result<StepSet<W>, regex::Error> {
        self.events.push((Regex::new(pattern)?, handler));
        Ok(self)
    }

    /// Register a postcondition ("Then") pattern.
    pub fn postcondition(
        mut self,
        pattern: &str,
        handler: StepFn<W>,
    ) -> Result<StepSet<W>, regex::Error> {
        self.postconditions.push((Regex::new(pattern)?, handler));
        Ok(self)
    }

    /// Merge a base set's tables ahead of this set's own, so inherited
    /// steps resolve first, in their own registration order.
    pub fn inherit(mut self, base: &StepSet<W>) -> StepSet<W> {
        let mut merged = base.clone();
        merged.contexts.append(&mut self.contexts);
        merged.events.append(&mut self.events);
        merged.postconditions.append(&mut self.postconditions);
        merged
    }

    fn table(&self, role: StepRole) -> &[(Regex, StepFn<W>)] {
        match role {
            StepRole::Context => &self.contexts,
            StepRole::Event => &self.events,
            StepRole::Postcondition => &self.postconditions,
        }
    }

    /// Resolve a statement to the first matching handler for the role.
    /// Patterns are unanchored: they match anywhere in the statement.
    pub fn resolve<'t>(
        &self,
        role: StepRole,
        statement: &'t str,
    ) -> Result<(Captures<'t>, StepFn<W>), StepError> {
        for (pattern, handler) in self.table(role) {
            if let Some(captures) = pattern.captures(statement) {
                return Ok((captures, *handler));
            }
        }
        Err(StepError::NotFound {
            role,
            statement: statement.to_string(),
        })
    }

    /// Resolve and execute one statement against the world.
    pub(crate) fn run(
        &self,
        role: StepRole,
        statement: &str,
        world: &mut W,
    ) -> Result<(), StepError> {
        let (captures, handler) = self.resolve(role, statement)?;
        handler(world, &captures)
    }
}
