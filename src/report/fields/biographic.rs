use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::report::rows::RowKind;

/// Recognized biographic row shapes, keyed by token count.
///
/// A new report variant needs a new arm here; unknown arities are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BiographicLayout<'a> {
    /// `id dob height weight eyes sex`
    Full {
        weight: &'a str,
        eye_color: &'a str,
        sex: &'a str,
    },
    /// `id dob height ? sex`; the fourth token has no known meaning.
    SexWithExtra { extra: &'a str, sex: &'a str },
    /// `id dob height sex`
    SexOnly { sex: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Biographic {
    pub identifier: String,
    pub date_of_birth: String,
    pub height: String,
    pub weight: Option<String>,
    pub eye_color: Option<String>,
    pub sex: String,
}

pub fn layout<'a>(tokens: &[&'a str]) -> Result<BiographicLayout<'a>> {
    match *tokens {
        [_, _, _, weight, eye_color, sex] => Ok(BiographicLayout::Full {
            weight,
            eye_color,
            sex,
        }),
        [_, _, _, extra, sex] => Ok(BiographicLayout::SexWithExtra { extra, sex }),
        [_, _, _, sex] => Ok(BiographicLayout::SexOnly { sex }),
        _ => Err(ExtractError::FieldArity {
            row: RowKind::Biographic,
            found: tokens.len(),
            expected: "4, 5 or 6",
        }),
    }
}

pub fn extract(tokens: &[&str]) -> Result<Biographic> {
    let shape = layout(tokens)?;
    debug!(?shape, "biographic layout");

    let (weight, eye_color, sex) = match shape {
        BiographicLayout::Full {
            weight,
            eye_color,
            sex,
        } => (Some(weight.to_string()), Some(eye_color.to_string()), sex),
        BiographicLayout::SexWithExtra { extra, sex } => {
            debug!(extra, "unmapped biographic token");
            (None, None, sex)
        }
        BiographicLayout::SexOnly { sex } => (None, None, sex),
    };

    Ok(Biographic {
        identifier: tokens[0].to_string(),
        date_of_birth: tokens[1].to_string(),
        height: tokens[2].to_string(),
        weight,
        eye_color,
        sex: sex.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bio(row: &str) -> Result<Biographic> {
        let tokens: Vec<&str> = row.split_whitespace().collect();
        extract(&tokens)
    }

    #[test]
    fn six_tokens_all_optional_fields() {
        let b = bio("A1234567 01/01/1990 510 170 BRO M").unwrap();
        assert_eq!(b.identifier, "A1234567");
        assert_eq!(b.date_of_birth, "01/01/1990");
        assert_eq!(b.height, "510");
        assert_eq!(b.weight.as_deref(), Some("170"));
        assert_eq!(b.eye_color.as_deref(), Some("BRO"));
        assert_eq!(b.sex, "M");
    }

    #[test]
    fn five_tokens_sex_only() {
        let b = bio("A1234567 01/01/1990 510 BRO F").unwrap();
        assert_eq!(b.weight, None);
        assert_eq!(b.eye_color, None);
        assert_eq!(b.sex, "F");
    }

    #[test]
    fn five_tokens_keeps_extra_in_layout() {
        let tokens = ["A1", "01/01/1990", "510", "BRO", "F"];
        assert_eq!(
            layout(&tokens).unwrap(),
            BiographicLayout::SexWithExtra { extra: "BRO", sex: "F" }
        );
    }

    #[test]
    fn four_tokens_sex_from_last() {
        let b = bio("A1234567 01/01/1990 510 M").unwrap();
        assert_eq!(b.weight, None);
        assert_eq!(b.eye_color, None);
        assert_eq!(b.sex, "M");
    }

    #[test]
    fn other_arities_rejected() {
        for row in ["A1 01/01/1990 510", "A1 01/01/1990 510 170 BRO M X", "A1"] {
            let err = bio(row).unwrap_err();
            assert!(matches!(
                err,
                ExtractError::FieldArity { row: RowKind::Biographic, .. }
            ));
        }
        let err = bio("A1 01/01/1990 510 170 BRO M X").unwrap_err();
        assert!(matches!(err, ExtractError::FieldArity { found: 7, .. }));
    }
}
