//! Two-column tables (`label, value`) turned into a [`Dataset`].

use crate::error::DataError;
use crate::models::Dataset;
use csv::ReaderBuilder;
use std::io::Read;

/// Drop whitespace (including no-break spaces used as thousands separators)
/// and turn a decimal comma into a point.
pub(crate) fn normalize_amount(cell: &str) -> String {
    cell.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

/// Parse a numeric cell after [`normalize_amount`]; only finite values pass.
pub fn parse_amount(cell: &str) -> Option<f64> {
    normalize_amount(cell)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Build a dataset from table rows: first cell = label, second cell = value.
pub fn dataset_from_rows<I, R, S>(rows: I) -> Result<Dataset, DataError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Dataset::new();
    for (row, cells) in rows.into_iter().enumerate() {
        let mut cells = cells.into_iter();
        let label = match cells.next() {
            Some(c) => c.as_ref().trim().to_string(),
            None => return Err(DataError::unparsable(row, "label", "")),
        };
        let raw = match cells.next() {
            Some(c) => c.as_ref().to_string(),
            None => return Err(DataError::unparsable(row, "value", "")),
        };
        let value = parse_amount(&raw).ok_or_else(|| DataError::unparsable(row, "value", raw.clone()))?;
        out.insert(label, value)?;
    }
    Ok(out)
}

/// Read a headerless two-column CSV table.
pub fn read_table_csv<R: Read>(reader: R) -> Result<Dataset, DataError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    dataset_from_rows(rows)
}
