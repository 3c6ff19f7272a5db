pub mod address;
pub mod fields;
pub mod lines;
pub mod rows;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::record::DriverRecord;
use address::tagger::{AddressTagger, LexicalTagger};
use address::{ClassificationGap, PostalCodeSource};
use rows::ReportRows;

/// A completed record plus any address tokens that need a manual look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub record: DriverRecord,
    pub gaps: Vec<ClassificationGap>,
}

/// Stateless report extractor; cheap to clone and share across threads.
#[derive(Clone)]
pub struct Extractor {
    tagger: Arc<dyn AddressTagger>,
    postal_source: PostalCodeSource,
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor::new(Arc::new(LexicalTagger), PostalCodeSource::default())
    }
}

impl Extractor {
    pub fn new(tagger: Arc<dyn AddressTagger>, postal_source: PostalCodeSource) -> Self {
        Extractor {
            tagger,
            postal_source,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Extractor::new(Arc::new(LexicalTagger), settings.postal_code_source)
    }

    /// Three-pass pipeline: panel fragments → lines → rows → record.
    pub fn extract<S: AsRef<str>>(&self, fragments: &[S]) -> Result<Extraction> {
        let lines = lines::segment_lines(fragments)?;
        let rows = ReportRows::from_lines(lines)?;
        let (record, gaps) = fields::assemble(&rows, self.tagger.as_ref(), self.postal_source)?;
        debug!(
            last_name = %record.last_name,
            license = %record.license_number,
            gaps = gaps.len(),
            "report extracted"
        );
        Ok(Extraction { record, gaps })
    }
}

/// Extract with the built-in tagger and default settings.
pub fn extract_report<S: AsRef<str>>(fragments: &[S]) -> Result<Extraction> {
    Extractor::default().extract(fragments)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::record::tests::sample;
    use crate::report::rows::RowKind;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.txt", name)).unwrap()
    }

    #[test]
    fn canada_report_fixture() {
        let ex = extract_report(&[fixture("canada_full")]).unwrap();
        let r = &ex.record;
        assert_eq!(r.first_name, "JOHN");
        assert_eq!(r.middle_name, "MICHAEL");
        assert_eq!(r.last_name, "SMITH");
        assert_eq!(r.suffix, "JR");
        assert_eq!(r.weight.as_deref(), Some("170"));
        assert_eq!(r.eye_color.as_deref(), Some("BRO"));
        assert_eq!(r.sex, "M");
        assert_eq!(r.street_address, "123 KING ST W");
        assert_eq!(r.city, "TORONTO");
        assert_eq!(r.state, "ON");
        assert_eq!(r.postal_code, "M5H 1A1");
        assert_eq!(r.commercial_class, "AZ");
        assert_eq!(r.convictions, 2);
        assert!(ex.gaps.is_empty());
    }

    #[test]
    fn sex_only_fixture() {
        let ex = extract_report(&[fixture("canada_sex_only")]).unwrap();
        assert_eq!(ex.record.weight, None);
        assert_eq!(ex.record.eye_color, None);
        assert_eq!(ex.record.sex, "F");
    }

    #[test]
    fn fixture_split_into_fragments() {
        let text = fixture("canada_full");
        let lines: Vec<&str> = text.lines().collect();
        let (head, tail) = lines.split_at(5);
        let fragments = [head.join("\n"), tail.join("\n")];
        let whole = extract_report(&[text.as_str()]).unwrap();
        assert_eq!(extract_report(&fragments).unwrap(), whole);
    }

    #[test]
    fn missing_row_fixture() {
        let err = extract_report(&[fixture("missing_row")]).unwrap_err();
        assert!(matches!(err, ExtractError::Structural { .. }));
    }

    #[test]
    fn address_gap_fixture() {
        let ex = extract_report(&[fixture("address_gap")]).unwrap();
        assert_eq!(ex.gaps.len(), 2);
        assert_eq!(ex.gaps[0].token, "SOMEWHERE");
        assert_eq!(ex.record.state, "NB");
    }

    #[test]
    fn round_trip() {
        let original = sample();
        let ex = extract_report(&[original.render_panel()]).unwrap();
        assert_eq!(ex.record, original);
        assert!(ex.gaps.is_empty());
    }

    #[test]
    fn round_trip_without_optionals() {
        let mut original = sample();
        original.weight = None;
        original.eye_color = None;
        let ex = extract_report(&[original.render_panel()]).unwrap();
        assert_eq!(ex.record, original);
    }

    #[test]
    fn round_trip_unit_street() {
        let mut original = sample();
        original.street_address = "APT 4, 12 ELM ST".into();
        let ex = extract_report(&[original.render_panel()]).unwrap();
        assert_eq!(ex.record, original);
        assert!(ex.gaps.is_empty());
    }

    #[test]
    fn legacy_postal_source() {
        let extractor = Extractor::new(Arc::new(LexicalTagger), PostalCodeSource::State);
        let ex = extractor.extract(&[sample().render_panel()]).unwrap();
        assert_eq!(ex.record.postal_code, "ON");
    }

    #[test]
    fn bad_biographic_arity_rejects_record() {
        let mut rows = sample().to_report_rows();
        rows[1] = "A1234567 01/15/1990 510 170 BRO M EXTRA".into();
        let panel: Vec<String> = rows.iter().map(|r| format!("{}\n{}", r, r)).collect();
        let err = extract_report(&panel).unwrap_err();
        assert_eq!(err.row(), Some(RowKind::Biographic));
        assert!(matches!(err, ExtractError::FieldArity { found: 7, .. }));
    }

    #[test]
    fn idempotent() {
        let panel = fixture("canada_full");
        assert_eq!(
            extract_report(&[panel.as_str()]).unwrap(),
            extract_report(&[panel.as_str()]).unwrap()
        );
    }
}
