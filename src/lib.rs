//! Extraction of CDLIS driver lookup reports into typed records.
//!
//! The scraping shell hands over the results panel's visible text; this crate
//! turns it into a [`DriverRecord`] or an [`ExtractError`] naming the bad row.

pub mod config;
pub mod error;
pub mod record;
pub mod report;

pub use error::ExtractError;
pub use record::DriverRecord;
pub use report::{extract_report, Extraction, Extractor};
