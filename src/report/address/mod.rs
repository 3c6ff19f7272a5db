pub mod tagger;

use serde::{Deserialize, Serialize};
use tracing::warn;

use tagger::{AddressLabel, AddressTagger};

/// Field categories the record cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressCategory {
    Street,
    City,
    State,
    PostalCode,
    Unclassified,
}

impl From<AddressLabel> for AddressCategory {
    fn from(label: AddressLabel) -> Self {
        match label {
            AddressLabel::HouseNumber | AddressLabel::StreetName | AddressLabel::StreetType => {
                AddressCategory::Street
            }
            AddressLabel::PlaceName => AddressCategory::City,
            AddressLabel::StateName => AddressCategory::State,
            AddressLabel::PostalCode => AddressCategory::PostalCode,
            AddressLabel::Other => AddressCategory::Unclassified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressToken {
    pub text: String,
    pub label: AddressLabel,
    pub category: AddressCategory,
}

/// Which tokens fill the postal-code field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostalCodeSource {
    /// Postal-code tokens.
    #[default]
    Postal,
    /// State tokens, matching the legacy scraper's output.
    State,
}

/// An address token no field accepted; the record is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationGap {
    pub token: String,
    pub label: &'static str,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub gaps: Vec<ClassificationGap>,
}

pub fn classify_tokens(tagger: &dyn AddressTagger, text: &str) -> Vec<AddressToken> {
    tagger
        .tag(text)
        .into_iter()
        .map(|(text, label)| AddressToken {
            text,
            label,
            category: label.into(),
        })
        .collect()
}

pub fn classify(tagger: &dyn AddressTagger, text: &str, postal_source: PostalCodeSource) -> Address {
    let tokens = classify_tokens(tagger, text);

    let join = |category: AddressCategory| -> String {
        tokens
            .iter()
            .filter(|t| t.category == category)
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };

    let gaps: Vec<ClassificationGap> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.category == AddressCategory::Unclassified)
        .map(|(position, t)| ClassificationGap {
            token: t.text.clone(),
            label: t.label.as_str(),
            position,
        })
        .collect();
    for gap in &gaps {
        warn!(token = %gap.token, position = gap.position, "unclassified address token");
    }

    let state = join(AddressCategory::State);
    let postal_code = match postal_source {
        PostalCodeSource::Postal => join(AddressCategory::PostalCode),
        PostalCodeSource::State => state.clone(),
    };

    Address {
        street: join(AddressCategory::Street),
        city: join(AddressCategory::City),
        state,
        postal_code,
        gaps,
    }
}
