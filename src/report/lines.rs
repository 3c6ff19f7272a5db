use crate::error::{ExtractError, Result};

use super::rows::ROW_COUNT;

/// Collapse raw panel fragments into the report's content lines.
///
/// The results panel renders a label or blank line between every content
/// line, so after blank lines are removed only even positions are kept.
pub fn segment_lines<S: AsRef<str>>(fragments: &[S]) -> Result<Vec<String>> {
    let joined = fragments
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join("\n");

    let meaningful: Vec<&str> = joined
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if meaningful.len() % 2 != 0 {
        return Err(ExtractError::structural(format!(
            "odd number of panel lines ({})",
            meaningful.len()
        )));
    }

    let lines: Vec<String> = meaningful
        .iter()
        .step_by(2)
        .map(|l| l.to_string())
        .collect();

    if lines.len() != ROW_COUNT {
        return Err(ExtractError::structural(format!(
            "expected {} report rows, found {}",
            ROW_COUNT,
            lines.len()
        )));
    }

    Ok(lines)
}
