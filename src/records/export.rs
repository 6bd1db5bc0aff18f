//! CSV export of mission records and travel authorizations.
//!
//! Column order is fixed so downstream spreadsheets keep working.

use std::io::Write;

use csv::Writer;

use crate::error::{EngineError, EngineResult};
use crate::models::{MissionRecord, TravelAuthorization};

/// Columns of the mission export.
pub const MISSION_COLUMNS: [&str; 7] = [
    "Name",
    "TA",
    "Country",
    "City",
    "Days",
    "Total DSA",
    "Attachments",
];

/// Columns of the travel authorization export.
pub const AUTHORIZATION_COLUMNS: [&str; 10] = [
    "Name",
    "TA",
    "Trip Type",
    "Project",
    "Fund",
    "Activity",
    "Budget",
    "Manager",
    "Focal Point",
    "Office",
];

/// Writes mission records as CSV to `writer`.
pub fn write_missions_csv<'a, W: Write>(
    writer: W,
    records: impl IntoIterator<Item = &'a MissionRecord>,
) -> EngineResult<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(MISSION_COLUMNS)?;

    for record in records {
        csv_writer.write_record([
            record.traveler.as_str(),
            record.ta_number.as_str(),
            record.country.as_str(),
            record.city.as_str(),
            record.days.to_string().as_str(),
            record.total_dsa.to_string().as_str(),
            record.attachments.to_string().as_str(),
        ])?;
    }

    csv_writer.flush().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}

/// Writes travel authorizations as CSV to `writer`.
pub fn write_authorizations_csv<'a, W: Write>(
    writer: W,
    authorizations: impl IntoIterator<Item = &'a TravelAuthorization>,
) -> EngineResult<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(AUTHORIZATION_COLUMNS)?;

    for ta in authorizations {
        csv_writer.write_record([
            ta.name.as_str(),
            ta.ta_number.as_str(),
            ta.trip_type.to_string().as_str(),
            ta.project.as_str(),
            ta.fund.as_str(),
            ta.activity.as_str(),
            ta.budget_line.as_str(),
            ta.manager.as_str(),
            ta.focal_point.as_str(),
            ta.office.as_str(),
        ])?;
    }

    csv_writer.flush().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}

fn into_string(buffer: Vec<u8>) -> EngineResult<String> {
    String::from_utf8(buffer).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}

/// Renders mission records as a CSV document.
pub fn missions_to_csv<'a>(
    records: impl IntoIterator<Item = &'a MissionRecord>,
) -> EngineResult<String> {
    let mut buffer = Vec::new();
    write_missions_csv(&mut buffer, records)?;
    into_string(buffer)
}

/// Renders travel authorizations as a CSV document.
pub fn authorizations_to_csv<'a>(
    authorizations: impl IntoIterator<Item = &'a TravelAuthorization>,
) -> EngineResult<String> {
    let mut buffer = Vec::new();
    write_authorizations_csv(&mut buffer, authorizations)?;
    into_string(buffer)
}
