use std::fmt;

/// The structural role a statement plays within a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRole {
    Context,
    Event,
    Postcondition,
}

impl fmt::Display for StepRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepRole::Context => "context",
            StepRole::Event => "event",
            StepRole::Postcondition => "postcondition",
        };
        f.write_str(label)
    }
}

/// A failure while resolving or executing one scenario statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// No registered pattern matches the statement.
    NotFound { role: StepRole, statement: String },
    /// An expectation check failed.
    Assertion(String),
    /// Any other handler failure.
    Other(String),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::NotFound { role, statement } => write!(
                f,
                "cannot find the {} step corresponding to '{}'",
                role, statement
            ),
            StepError::Assertion(message) => write!(f, "failed assertion: {}", message),
            StepError::Other(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for StepError {}

/// Assert two values are equal, as a step result.
pub fn expect_eq<T: PartialEq + fmt::Debug>(a: T, b: T) -> Result<(), StepError> {
    if a == b {
        Ok(())
    } else {
        Err(StepError::Assertion(format!("{:?} != {:?}", a, b)))
    }
}

/// Assert a condition holds, as a step result.
pub fn expect(condition: bool, message: &str) -> Result<(), StepError> {
    if condition {
        Ok(())
    } else {
        Err(StepError::Assertion(message.to_string()))
    }
}
