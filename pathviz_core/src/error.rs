use thiserror::Error;

use crate::grid::Position;

pub type Result<T, E = SessionError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid value {value} at cell ({row}, {col})")]
    BadCell { row: usize, col: usize, value: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepairError {
    #[error("a {rows}x{cols} grid cannot hold the preferred start and end cells")]
    TooSmall { rows: usize, cols: usize },
}

/// Local checks that run before the service is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start position {0} is blocked by a wall")]
    StartBlocked(Position),

    #[error("end position {0} is blocked by a wall")]
    EndBlocked(Position),

    #[error("a maze needs at least {min} rows and columns, got {rows}x{cols}")]
    MazeTooSmall { rows: usize, cols: usize, min: usize },

    #[error("a maze is still being generated")]
    GenerationRunning,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("service rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("malformed response: {message}")]
    Decode { message: String },
}

impl ServiceError {
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Failures a session surfaces to the user. Cancellation is not one of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no path exists between start and end")]
    Unreachable,

    #[error(transparent)]
    Transport(#[from] ServiceError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Repair(#[from] RepairError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_cell() {
        let error = SessionError::from(ValidationError::EndBlocked(Position::new(4, 3)));
        assert_eq!(error.to_string(), "end position (4, 3) is blocked by a wall");
    }

    #[test]
    fn rejected_keeps_service_detail() {
        let error = SessionError::from(ServiceError::Rejected {
            status: 400,
            detail: "Start position is a wall".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "service rejected the request (400): Start position is a wall"
        );
    }
}
