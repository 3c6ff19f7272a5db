use serde::{Deserialize, Serialize};

use crate::report::rows::ROW_COUNT;

/// One driver's lookup result, built atomically from a six-row report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub suffix: String,

    pub identifier: String,
    pub date_of_birth: String,
    pub height: String,
    pub weight: Option<String>,
    pub eye_color: Option<String>,
    pub sex: String,

    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,

    pub jurisdiction: String,
    pub license_number: String,
    pub issue_date: String,
    pub expiration_date: String,
    pub commercial_class: String,
    pub noncommercial_class: String,
    pub commercial_status: String,
    pub noncommercial_status: String,
    pub withdrawal_action: String,

    pub endorsements: String,

    pub convictions: u32,
    pub accidents: u32,
    pub withdrawals: u32,
    pub permits: u32,
    pub restrictions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub month: String,
    pub day: String,
    pub year: String,
}

impl DriverRecord {
    /// Split a `MM/DD/YYYY` date of birth into the search form's three inputs.
    pub fn dob_parts(&self) -> Option<DateParts> {
        let mut parts = self.date_of_birth.split('/');
        let month = parts.next()?;
        let day = parts.next()?;
        let year = parts.next()?;
        let numeric = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
        if parts.next().is_some() || !numeric(month, 2) || !numeric(day, 2) || !numeric(year, 4) {
            return None;
        }
        Some(DateParts {
            month: month.to_string(),
            day: day.to_string(),
            year: year.to_string(),
        })
    }

    /// Serialize back into the six row formats the panel displays.
    pub fn to_report_rows(&self) -> [String; ROW_COUNT] {
        let name = [
            self.first_name.as_str(),
            self.middle_name.as_str(),
            self.last_name.as_str(),
            self.suffix.as_str(),
        ]
        .join(" ");

        let mut bio = vec![
            self.identifier.as_str(),
            self.date_of_birth.as_str(),
            self.height.as_str(),
        ];
        if let (Some(weight), Some(eye)) = (&self.weight, &self.eye_color) {
            bio.push(weight);
            bio.push(eye);
        }
        bio.push(&self.sex);

        let address = format!(
            "{}, {} {} {}",
            self.street_address, self.city, self.state, self.postal_code
        );

        let license = [
            self.jurisdiction.as_str(),
            self.license_number.as_str(),
            self.issue_date.as_str(),
            self.expiration_date.as_str(),
            self.commercial_class.as_str(),
            self.noncommercial_class.as_str(),
            self.commercial_status.as_str(),
            self.noncommercial_status.as_str(),
            self.withdrawal_action.as_str(),
        ]
        .join(" ");

        let history = format!(
            "{} {} {} {} {}",
            self.convictions, self.accidents, self.withdrawals, self.permits, self.restrictions
        );

        [
            name,
            bio.join(" "),
            address,
            license,
            self.endorsements.clone(),
            history,
        ]
    }

    /// Panel text as scraped: every content line followed by its duplicate.
    pub fn render_panel(&self) -> String {
        self.to_report_rows()
            .iter()
            .map(|row| format!("{}\n{}", row, row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
