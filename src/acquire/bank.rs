//! Bank account exports: per-transaction CSV rows reduced to category totals
//! and compared between two periods.

use super::table::normalize_amount;
use crate::error::DataError;
use crate::models::CostItem;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Where to find the category and amount in an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSettings {
    pub tag_column: String,
    pub amount_column: String,
    /// Lines before the header row (the bank prints an account line first).
    pub skip_lines: usize,
    pub delimiter: u8,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            tag_column: "Kategorie".into(),
            amount_column: "Částka v měně účtu".into(),
            skip_lines: 1,
            delimiter: b',',
        }
    }
}

/// Parse a money cell exactly (`-1 234,50` -> `-1234.50`).
pub fn parse_money(cell: &str) -> Option<Decimal> {
    Decimal::from_str(&normalize_amount(cell)).ok()
}

/// Read one cost item per transaction row.
pub fn load_cost_items<R: Read>(
    mut reader: R,
    settings: &ImportSettings,
) -> Result<Vec<CostItem>, DataError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    let contents = contents.trim_start_matches('\u{feff}');
    // Skip the preamble by line, keeping the rest as one slice for the CSV reader.
    let mut body = contents;
    for _ in 0..settings.skip_lines {
        body = match body.split_once('\n') {
            Some((_, rest)) => rest,
            None => "",
        };
    }

    let mut rdr = ReaderBuilder::new()
        .delimiter(settings.delimiter)
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(DataError::MissingHeader);
    }
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    let tag_index = column(&settings.tag_column)?;
    let amount_index = column(&settings.amount_column)?;

    let mut items = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let row = record
            .position()
            .map(|p| p.line() as usize + settings.skip_lines)
            .unwrap_or(0);
        let tag = record.get(tag_index).unwrap_or("").trim();
        let raw = record.get(amount_index).unwrap_or("");
        let amount = parse_money(raw).ok_or_else(|| DataError::unparsable(row, "amount", raw))?;
        items.push(CostItem::new(tag, amount));
    }
    Ok(items)
}

/// [`load_cost_items`] from a file on disk.
pub fn load_cost_items_from_path<P: AsRef<Path>>(
    path: P,
    settings: &ImportSettings,
) -> Result<Vec<CostItem>, DataError> {
    load_cost_items(File::open(path)?, settings)
}

/// Sum amounts per tag, keeping first-seen tag order.
pub fn totals_by_tag(items: &[CostItem]) -> Vec<CostItem> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CostItem> = Vec::new();
    for item in items {
        match index.get(item.tag.as_str()) {
            Some(&i) => out[i].amount += item.amount,
            None => {
                index.insert(item.tag.as_str(), out.len());
                out.push(item.clone());
            }
        }
    }
    out
}

/// Per-tag difference `current - baseline`, largest increase first.
///
/// Tags missing from `current` count as zero there; tags only present in
/// `current` are reported with their full amount.
pub fn compare_expenses(baseline: &[CostItem], current: &[CostItem]) -> Vec<CostItem> {
    let baseline = totals_by_tag(baseline);
    let current = totals_by_tag(current);
    let current_by_tag: HashMap<&str, Decimal> =
        current.iter().map(|c| (c.tag.as_str(), c.amount)).collect();

    let mut comparison: Vec<CostItem> = baseline
        .iter()
        .map(|b| {
            let now = current_by_tag
                .get(b.tag.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);
            CostItem::new(&b.tag, now - b.amount)
        })
        .collect();

    comparison.extend(
        current
            .iter()
            .filter(|c| !baseline.iter().any(|b| b.tag == c.tag))
            .cloned(),
    );

    comparison.sort_by(|x, y| y.amount.cmp(&x.amount));
    comparison
}
