use csv::{QuoteStyle, WriterBuilder};

use super::models::{Registration, EXPORT_COLUMNS};
use super::persistence::StoreError;

/// Pretty-printed JSON array with every attribute of every record.
pub fn to_json(registrations: &[Registration]) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec_pretty(registrations)?)
}

/// Bare header line followed by one fully quoted line per record.
///
/// Lines are joined with `\n` and there is no trailing newline, so an empty
/// export is exactly the header.
pub fn to_csv(registrations: &[Registration]) -> Result<Vec<u8>, StoreError> {
    let mut out = EXPORT_COLUMNS.join(",").into_bytes();
    if registrations.is_empty() {
        return Ok(out);
    }
    out.push(b'\n');

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    for registration in registrations {
        wtr.write_record(registration.columns())?;
    }

    let mut out = wtr
        .into_inner()
        .map_err(|e| StoreError::Csv(e.into_error().into()))?;
    if out.last() == Some(&b'\n') {
        out.pop();
    }

    Ok(out)
}
