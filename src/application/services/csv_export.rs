//! Member contact list export.

use crate::domain::entities::Member;
use crate::domain::errors::ExportError;

/// Default file name of the member export.
pub const MEMBERS_CSV_FILE: &str = "hello_club_members.csv";

const HEADER: [&str; 3] = ["Name", "Mobile", "Email"];

/// Encodes name, mobile and email of every member as UTF-8 CSV.
///
/// # Errors
/// Returns error if the CSV writer fails.
pub fn members_to_csv(members: &[Member]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for member in members {
        writer.write_record([
            member.name.as_str(),
            member.mobile.as_str(),
            member.email.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}
