pub mod biographic;
pub mod positional;

use super::address::{self, tagger::AddressTagger, ClassificationGap, PostalCodeSource};
use super::rows::{ReportRows, RowKind};
use crate::error::Result;
use crate::record::DriverRecord;

/// Build a record from six positioned rows. The first failing row aborts.
pub fn assemble(
    rows: &ReportRows,
    tagger: &dyn AddressTagger,
    postal_source: PostalCodeSource,
) -> Result<(DriverRecord, Vec<ClassificationGap>)> {
    let name = positional::name(&rows.tokens(RowKind::Name)?)?;
    let bio = biographic::extract(&rows.tokens(RowKind::Biographic)?)?;
    let address = address::classify(tagger, rows.get(RowKind::Address), postal_source);
    let license = positional::license(&rows.tokens(RowKind::License)?)?;
    let endorsements = rows.get(RowKind::Endorsement).to_string();
    let history = positional::history(&rows.tokens(RowKind::History)?)?;

    let record = DriverRecord {
        first_name: name.first,
        middle_name: name.middle,
        last_name: name.last,
        suffix: name.suffix,

        identifier: bio.identifier,
        date_of_birth: bio.date_of_birth,
        height: bio.height,
        weight: bio.weight,
        eye_color: bio.eye_color,
        sex: bio.sex,

        street_address: address.street,
        city: address.city,
        state: address.state,
        postal_code: address.postal_code,

        jurisdiction: license.jurisdiction,
        license_number: license.number,
        issue_date: license.issue_date,
        expiration_date: license.expiration_date,
        commercial_class: license.commercial_class,
        noncommercial_class: license.noncommercial_class,
        commercial_status: license.commercial_status,
        noncommercial_status: license.noncommercial_status,
        withdrawal_action: license.withdrawal_action,

        endorsements,

        convictions: history.convictions,
        accidents: history.accidents,
        withdrawals: history.withdrawals,
        permits: history.permits,
        restrictions: history.restrictions,
    };

    Ok((record, address.gaps))
}
