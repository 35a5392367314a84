use crate::models::Dataset;
use anyhow::Result;
use csv::WriterBuilder;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula with `'`.
///
/// Negative numbers written as labels (`-12`) stay untouched.
fn sanitize_cell(s: &str) -> String {
    let risky = match s.chars().next() {
        Some('=' | '+' | '@' | '\t' | '\r') => true,
        Some('-') => s.parse::<f64>().is_err(),
        _ => false,
    };
    if risky { format!("'{}", s) } else { s.to_string() }
}

/// Save the dataset as CSV with a `label,value` header.
pub fn save_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["label", "value"])?;
    for (label, value) in dataset.iter() {
        wtr.serialize((sanitize_cell(label), value))?;
    }
    wtr.flush()?;
    info!("saved {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// Save the dataset as a pretty JSON array of `{label, value}` objects.
pub fn save_json<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(dataset.entries())?;
    f.write_all(s.as_bytes())?;
    info!("saved {} rows to {}", dataset.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let ds = Dataset::try_from(vec![("Food".to_string(), 1.25)]).unwrap();
        save_csv(&ds, &csvp).unwrap();
        save_json(&ds, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }

    #[test]
    fn sanitize_keeps_plain_and_numeric_cells() {
        assert_eq!(sanitize_cell("Food"), "Food");
        assert_eq!(sanitize_cell("-12.5"), "-12.5");
        assert_eq!(sanitize_cell("-cmd"), "'-cmd");
        assert_eq!(sanitize_cell("=1+1"), "'=1+1");
    }
}
