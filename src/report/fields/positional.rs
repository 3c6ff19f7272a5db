//! Rows with a single fixed layout: name, license and history.

use crate::error::{ExtractError, Result};
use crate::report::rows::RowKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub first: String,
    pub middle: String,
    pub last: String,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub jurisdiction: String,
    pub number: String,
    pub issue_date: String,
    pub expiration_date: String,
    pub commercial_class: String,
    pub noncommercial_class: String,
    pub commercial_status: String,
    pub noncommercial_status: String,
    pub withdrawal_action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct History {
    pub convictions: u32,
    pub accidents: u32,
    pub withdrawals: u32,
    pub permits: u32,
    pub restrictions: u32,
}

const HISTORY_FIELDS: [&str; 5] = ["convictions", "accidents", "withdrawals", "permits", "restrictions"];

fn arity(row: RowKind, tokens: &[&str], expected: &'static str) -> ExtractError {
    ExtractError::FieldArity {
        row,
        found: tokens.len(),
        expected,
    }
}

pub fn name(tokens: &[&str]) -> Result<Name> {
    let [first, middle, last, suffix] = *tokens else {
        return Err(arity(RowKind::Name, tokens, "4"));
    };
    Ok(Name {
        first: first.to_string(),
        middle: middle.to_string(),
        last: last.to_string(),
        suffix: suffix.to_string(),
    })
}

pub fn license(tokens: &[&str]) -> Result<License> {
    let [jurisdiction, number, issue, expiration, cdl_class, non_cdl_class, cdl_status, non_cdl_status, withdrawal] =
        *tokens
    else {
        return Err(arity(RowKind::License, tokens, "9"));
    };
    Ok(License {
        jurisdiction: jurisdiction.to_string(),
        number: number.to_string(),
        issue_date: issue.to_string(),
        expiration_date: expiration.to_string(),
        commercial_class: cdl_class.to_string(),
        noncommercial_class: non_cdl_class.to_string(),
        commercial_status: cdl_status.to_string(),
        noncommercial_status: non_cdl_status.to_string(),
        withdrawal_action: withdrawal.to_string(),
    })
}

pub fn history(tokens: &[&str]) -> Result<History> {
    if tokens.len() != HISTORY_FIELDS.len() {
        return Err(arity(RowKind::History, tokens, "5"));
    }

    let mut counts = [0u32; 5];
    for ((slot, field), value) in counts.iter_mut().zip(HISTORY_FIELDS).zip(tokens) {
        let invalid = || ExtractError::InvalidCount {
            row: RowKind::History,
            field,
            value: value.to_string(),
        };
        // Digits only; `parse` alone would accept a sign.
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = value.parse().map_err(|_| invalid())?;
    }

    let [convictions, accidents, withdrawals, permits, restrictions] = counts;
    Ok(History {
        convictions,
        accidents,
        withdrawals,
        permits,
        restrictions,
    })
}
