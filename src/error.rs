use crate::util::Position;
use std::fmt::{Display, Formatter};

/// Raised by the scanner when a line contains a substring no lexical rule matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub position: Position,
    pub message: String,
}

impl ScanError {
    pub(crate) fn new(position: Position, residual: &str) -> Self {
        Self {
            position,
            message: format!("no lexical rule matches {:?}", residual),
        }
    }
}

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnknownToken at {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ScanError {}

/// Raised by the compressor or parser when an expected structural token is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The scanner could not tokenize the input at all.
    Scan(ScanError),
    /// The compressor or parser found a structural mismatch.
    Malformed { position: Position, message: String },
}

impl SyntaxError {
    pub(crate) fn malformed(position: Position, message: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            message: message.into(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            SyntaxError::Scan(err) => err.position,
            SyntaxError::Malformed { position, .. } => *position,
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::Scan(err) => write!(f, "SyntaxError: {}", err),
            SyntaxError::Malformed { position, message } => {
                write!(f, "SyntaxError at {}: {}", position, message)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

impl From<ScanError> for SyntaxError {
    fn from(err: ScanError) -> Self {
        SyntaxError::Scan(err)
    }
}
