use std::sync::LazyLock;

use regex::Regex;

static CA_POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]\d[A-Za-z]\d[A-Za-z]\d$").unwrap());
static CA_FSA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]\d[A-Za-z]$").unwrap());
static CA_LDU_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d[A-Za-z]\d$").unwrap());
static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap());

const PROVINCES: &[&str] = &[
    "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT",
];
const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];
const STREET_TYPES: &[&str] = &[
    "ST", "STREET", "AVE", "AV", "AVENUE", "RD", "ROAD", "BLVD", "BOULEVARD", "DR", "DRIVE",
    "CRES", "CRESCENT", "CRT", "CT", "COURT", "WAY", "LANE", "LN", "PL", "PLACE", "HWY",
    "HIGHWAY", "TRAIL", "TRL", "TERR", "TER", "TERRACE", "PKWY", "PARKWAY", "CIR", "CIRCLE",
    "SQ", "SQUARE", "GATE", "GDNS", "GARDENS", "LINE", "CONC", "SIDEROAD", "RUE", "CHEMIN",
];
const DIRECTIONALS: &[&str] = &["N", "S", "E", "W", "NE", "NW", "SE", "SW", "NORTH", "SOUTH", "EAST", "WEST"];
const UNIT_DESIGNATORS: &[&str] = &["UNIT", "APT", "SUITE", "STE", "RR"];

/// Labels an address-parsing collaborator assigns to tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressLabel {
    HouseNumber,
    StreetName,
    StreetType,
    PlaceName,
    StateName,
    PostalCode,
    Other,
}

impl AddressLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            AddressLabel::HouseNumber => "house_number",
            AddressLabel::StreetName => "street_name",
            AddressLabel::StreetType => "street_type",
            AddressLabel::PlaceName => "place_name",
            AddressLabel::StateName => "state_name",
            AddressLabel::PostalCode => "postal_code",
            AddressLabel::Other => "other",
        }
    }
}

/// Splits a free-text address into ordered, labelled tokens.
pub trait AddressTagger: Send + Sync {
    fn tag(&self, address: &str) -> Vec<(String, AddressLabel)>;
}

/// Rule-based tagger for single-line Canadian and US addresses.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalTagger;

struct Token<'a> {
    text: &'a str,
    comma: bool,
}

impl AddressTagger for LexicalTagger {
    fn tag(&self, address: &str) -> Vec<(String, AddressLabel)> {
        let mut tokens: Vec<Token> = Vec::new();
        for raw in address.split_whitespace() {
            let text = raw.trim_end_matches(',');
            if text.is_empty() {
                // A detached comma closes the token before it.
                if let Some(prev) = tokens.last_mut() {
                    prev.comma = true;
                }
                continue;
            }
            tokens.push(Token {
                text,
                comma: text.len() != raw.len(),
            });
        }

        let mut labels = vec![AddressLabel::Other; tokens.len()];
        // `end` shrinks as tail components are claimed.
        let mut end = tokens.len();

        // Postal code
        if end >= 2 && CA_FSA_RE.is_match(tokens[end - 2].text) && CA_LDU_RE.is_match(tokens[end - 1].text) {
            labels[end - 2] = AddressLabel::PostalCode;
            labels[end - 1] = AddressLabel::PostalCode;
            end -= 2;
        } else if end >= 1 && (CA_POSTAL_RE.is_match(tokens[end - 1].text) || ZIP_RE.is_match(tokens[end - 1].text)) {
            labels[end - 1] = AddressLabel::PostalCode;
            end -= 1;
        }

        // Province / state
        if end >= 1 && is_region(tokens[end - 1].text) {
            labels[end - 1] = AddressLabel::StateName;
            end -= 1;
        }

        let mut start = 0;

        // Leading house number, unit or box
        while start < end {
            let t = tokens[start].text;
            let upper = t.to_ascii_uppercase();
            if t.starts_with(|c: char| c.is_ascii_digit()) || t.starts_with('#') {
                labels[start] = AddressLabel::HouseNumber;
                start += 1;
            } else if UNIT_DESIGNATORS.contains(&upper.as_str()) && start + 1 < end {
                labels[start] = AddressLabel::HouseNumber;
                labels[start + 1] = AddressLabel::HouseNumber;
                start += 2;
            } else if (upper == "PO" || upper == "P.O.") && start + 2 < end
                && tokens[start + 1].text.eq_ignore_ascii_case("BOX")
            {
                labels[start] = AddressLabel::StreetName;
                labels[start + 1] = AddressLabel::StreetName;
                labels[start + 2] = AddressLabel::HouseNumber;
                start += 3;
            } else {
                break;
            }
        }

        // A comma right after the prefix only ends the street when nothing
        // later does.
        let street_end = street_boundary(&tokens[..end], start)
            .or_else(|| (start > 0 && tokens[start - 1].comma).then_some(start));
        let Some(street_end) = street_end else {
            return finish(tokens, labels, 0);
        };

        for (i, token) in tokens.iter().enumerate().take(street_end).skip(start) {
            labels[i] = if is_street_type(token.text) || (is_directional(token.text) && i > start) {
                AddressLabel::StreetType
            } else {
                AddressLabel::StreetName
            };
        }
        for label in labels.iter_mut().take(end).skip(street_end) {
            *label = AddressLabel::PlaceName;
        }

        finish(tokens, labels, street_end)
    }
}

/// Commas inside the street (before `street_end - 1`) stay on their token.
fn finish(tokens: Vec<Token>, labels: Vec<AddressLabel>, street_end: usize) -> Vec<(String, AddressLabel)> {
    tokens
        .into_iter()
        .zip(labels)
        .enumerate()
        .map(|(i, (t, l))| {
            let text = if t.comma && i + 1 < street_end {
                format!("{},", t.text)
            } else {
                t.text.to_string()
            };
            (text, l)
        })
        .collect()
}

/// Index one past the last street token, searching `tokens[start..]`.
///
/// A comma ends the street; failing that the first street-type suffix does,
/// extended by one trailing directional. Tokens must remain for the city.
fn street_boundary(tokens: &[Token], start: usize) -> Option<usize> {
    if let Some(i) = tokens[start..].iter().position(|t| t.comma) {
        return Some(start + i + 1);
    }

    // Street name needs at least one token before its type.
    let first_type = (start + 1..tokens.len()).find(|&i| is_street_type(tokens[i].text))?;
    let mut end = first_type + 1;
    if end < tokens.len() && is_directional(tokens[end].text) && end + 1 < tokens.len() {
        end += 1;
    }
    (end < tokens.len()).then_some(end)
}

fn is_region(t: &str) -> bool {
    let upper = t.to_ascii_uppercase();
    PROVINCES.contains(&upper.as_str()) || STATES.contains(&upper.as_str())
}

fn is_street_type(t: &str) -> bool {
    let upper = t.trim_end_matches('.').to_ascii_uppercase();
    STREET_TYPES.contains(&upper.as_str())
}

fn is_directional(t: &str) -> bool {
    let upper = t.trim_end_matches('.').to_ascii_uppercase();
    DIRECTIONALS.contains(&upper.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::AddressLabel::*;

    fn labels(addr: &str) -> Vec<AddressLabel> {
        LexicalTagger.tag(addr).into_iter().map(|(_, l)| l).collect()
    }

    #[test]
    fn canadian_with_comma() {
        let tagged = LexicalTagger.tag("123 KING ST W, TORONTO ON M5H 1A1");
        let texts: Vec<&str> = tagged.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["123", "KING", "ST", "W", "TORONTO", "ON", "M5H", "1A1"]);
        assert_eq!(
            labels("123 KING ST W, TORONTO ON M5H 1A1"),
            vec![HouseNumber, StreetName, StreetType, StreetType, PlaceName, StateName, PostalCode, PostalCode]
        );
    }

    #[test]
    fn boundary_from_street_type() {
        assert_eq!(
            labels("45 MAPLE AVE NIAGARA FALLS ON L2E6S4"),
            vec![HouseNumber, StreetName, StreetType, PlaceName, PlaceName, StateName, PostalCode]
        );
    }

    #[test]
    fn directional_after_type() {
        assert_eq!(
            labels("9 MAIN ST N BRAMPTON ON L6V 1N6"),
            vec![HouseNumber, StreetName, StreetType, StreetType, PlaceName, StateName, PostalCode, PostalCode]
        );
    }

    #[test]
    fn saint_city_after_street_type() {
        assert_eq!(
            labels("8 LAKE ST ST CATHARINES ON L2R 5K1"),
            vec![HouseNumber, StreetName, StreetType, PlaceName, PlaceName, StateName, PostalCode, PostalCode]
        );
    }

    #[test]
    fn us_zip() {
        assert_eq!(
            labels("700 OAK DR AUSTIN TX 73301-0001"),
            vec![HouseNumber, StreetName, StreetType, PlaceName, StateName, PostalCode]
        );
    }

    #[test]
    fn unit_prefix() {
        assert_eq!(
            labels("UNIT 4 12 ELM CRES, OTTAWA ON K1A 0B1"),
            vec![HouseNumber, HouseNumber, HouseNumber, StreetName, StreetType, PlaceName, StateName, PostalCode, PostalCode]
        );
    }

    #[test]
    fn po_box() {
        assert_eq!(
            labels("PO BOX 55, REGINA SK S4P 3Y2"),
            vec![StreetName, StreetName, HouseNumber, PlaceName, StateName, PostalCode, PostalCode]
        );
    }

    #[test]
    fn comma_after_unit_does_not_end_street() {
        let tagged = LexicalTagger.tag("APT 4, 12 ELM ST, OTTAWA ON K1A 0B1");
        let texts: Vec<&str> = tagged.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["APT", "4,", "12", "ELM", "ST", "OTTAWA", "ON", "K1A", "0B1"]);
        assert_eq!(
            labels("APT 4, 12 ELM ST, OTTAWA ON K1A 0B1"),
            vec![HouseNumber, HouseNumber, HouseNumber, StreetName, StreetType, PlaceName, StateName, PostalCode, PostalCode]
        );
    }

    #[test]
    fn unit_comma_without_later_boundary_is_other() {
        assert_eq!(
            labels("APT 4, 12 ELM OTTAWA ON K1A 0B1"),
            vec![HouseNumber, HouseNumber, HouseNumber, Other, Other, StateName, PostalCode, PostalCode]
        );
    }

    #[test]
    fn detached_comma_marks_boundary() {
        let tagged = LexicalTagger.tag("123 BROADWAY , TORONTO ON M5H 1A1");
        assert_eq!(tagged.len(), 6);
        assert_eq!(tagged[1], ("BROADWAY".to_string(), StreetName));
        assert_eq!(tagged[2], ("TORONTO".to_string(), PlaceName));
    }

    #[test]
    fn no_boundary_leaves_other() {
        assert_eq!(
            labels("123 SOMEWHERE TOWN ON K1A 0B1"),
            vec![HouseNumber, Other, Other, StateName, PostalCode, PostalCode]
        );
    }

    #[test]
    fn street_type_as_last_token_is_not_a_street() {
        // Nothing would remain for the city.
        assert_eq!(labels("12 KING ST ON"), vec![HouseNumber, Other, Other, StateName]);
    }
}
