use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Text,
    Pattern,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::Text => f.write_str("text"),
            InputField::Pattern => f.write_str("pattern"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExperimentError {
    #[error("invalid input: {0} must not be empty")]
    InvalidInput(InputField),
    #[error("sweep multiplier {multiplier} would build a text over {limit} bytes")]
    SweepTooLarge { multiplier: f64, limit: usize },
}
