use thiserror::Error;

use crate::report::rows::RowKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Wrong number of report lines survived segmentation.
    #[error("malformed report: {reason}")]
    Structural { reason: String },

    #[error("{row} row has {found} fields, expected {expected}")]
    FieldArity {
        row: RowKind,
        found: usize,
        expected: &'static str,
    },

    #[error("{row} row is empty")]
    EmptyRow { row: RowKind },

    #[error("{row} row field {field} is not a count: {value:?}")]
    InvalidCount {
        row: RowKind,
        field: &'static str,
        value: String,
    },
}

impl ExtractError {
    pub fn structural(reason: impl Into<String>) -> Self {
        ExtractError::Structural {
            reason: reason.into(),
        }
    }

    /// The report row the failure belongs to, if it is row-specific.
    pub fn row(&self) -> Option<RowKind> {
        match self {
            ExtractError::Structural { .. } => None,
            ExtractError::FieldArity { row, .. }
            | ExtractError::EmptyRow { row }
            | ExtractError::InvalidCount { row, .. } => Some(*row),
        }
    }

    /// Short stable label used when summarising batch failures.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::Structural { .. } => "structural",
            ExtractError::FieldArity { .. } => "field_arity",
            ExtractError::EmptyRow { .. } => "empty_row",
            ExtractError::InvalidCount { .. } => "invalid_count",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
