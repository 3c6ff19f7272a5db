use std::fmt;

use serde::Serialize;

use crate::error::{ExtractError, Result};

pub const ROW_COUNT: usize = 6;

/// The six fixed sections of a lookup result, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Name,
    Biographic,
    Address,
    License,
    Endorsement,
    History,
}

impl RowKind {
    pub const ALL: [RowKind; ROW_COUNT] = [
        RowKind::Name,
        RowKind::Biographic,
        RowKind::Address,
        RowKind::License,
        RowKind::Endorsement,
        RowKind::History,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RowKind::Name => "name",
            RowKind::Biographic => "biographic",
            RowKind::Address => "address",
            RowKind::License => "license",
            RowKind::Endorsement => "endorsement",
            RowKind::History => "history",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report lines assigned to their row slots by position.
#[derive(Debug, Clone)]
pub struct ReportRows {
    lines: [String; ROW_COUNT],
}

impl ReportRows {
    pub fn from_lines(lines: Vec<String>) -> Result<Self> {
        let found = lines.len();
        let lines: [String; ROW_COUNT] = lines.try_into().map_err(|_| {
            ExtractError::structural(format!(
                "expected {} report rows, found {}",
                ROW_COUNT, found
            ))
        })?;

        for (kind, line) in RowKind::ALL.iter().zip(&lines) {
            if line.trim().is_empty() {
                return Err(ExtractError::EmptyRow { row: *kind });
            }
        }

        Ok(ReportRows { lines })
    }

    pub fn get(&self, kind: RowKind) -> &str {
        // Variants are declared in panel order.
        &self.lines[kind as usize]
    }

    pub fn tokens(&self, kind: RowKind) -> Result<Vec<&str>> {
        tokenize(kind, self.get(kind))
    }
}

/// Split a row on whitespace. Runs of whitespace collapse; an empty row fails.
pub fn tokenize(kind: RowKind, row: &str) -> Result<Vec<&str>> {
    let tokens: Vec<&str> = row.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ExtractError::EmptyRow { row: kind });
    }
    Ok(tokens)
}
