use crate::error::DataError;
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One labelled value of a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub label: String,
    pub value: f64,
}

/// Ordered `label -> value` mapping driving one chart render.
///
/// Labels are unique, values are finite, and insertion order is the
/// left-to-right bar order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    entries: Vec<DatasetEntry>,
    index: HashMap<String, usize>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry. Repeated labels and non-finite values are rejected.
    pub fn insert(&mut self, label: impl Into<String>, value: f64) -> Result<(), DataError> {
        let label = label.into();
        if !value.is_finite() {
            return Err(DataError::unparsable(self.entries.len(), "value", value.to_string()));
        }
        if self.index.contains_key(&label) {
            return Err(DataError::DuplicateLabel(label));
        }
        self.index.insert(label.clone(), self.entries.len());
        self.entries.push(DatasetEntry { label, value });
        Ok(())
    }

    /// Sum expense amounts per tag; tags keep the order they were first seen in.
    ///
    /// A running total that leaves the finite range fails with
    /// [`DataError::UnparsableValue`] naming the record that overflowed it.
    pub fn from_expenses(expenses: &[Expense]) -> Result<Self, DataError> {
        let mut out = Self::new();
        for e in expenses {
            match out.index.get(&e.tag) {
                Some(&i) => {
                    let total = out.entries[i].value + e.amount;
                    if !total.is_finite() {
                        let row = usize::try_from(e.id).unwrap_or(usize::MAX);
                        return Err(DataError::unparsable(row, "amount", total.to_string()));
                    }
                    out.entries[i].value = total;
                }
                None => out.insert(e.tag.clone(), e.amount)?,
            }
        }
        Ok(out)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.index.get(label).map(|&i| self.entries[i].value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|e| (e.label.as_str(), e.value))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.value)
    }
}

impl TryFrom<Vec<(String, f64)>> for Dataset {
    type Error = DataError;

    fn try_from(pairs: Vec<(String, f64)>) -> Result<Self, Self::Error> {
        let mut out = Dataset::new();
        for (label, value) in pairs {
            out.insert(label, value)?;
        }
        Ok(out)
    }
}

impl TryFrom<&[CostItem]> for Dataset {
    type Error = DataError;

    fn try_from(items: &[CostItem]) -> Result<Self, Self::Error> {
        let mut out = Dataset::new();
        for (row, item) in items.iter().enumerate() {
            let value = item
                .amount
                .to_f64()
                .ok_or_else(|| DataError::unparsable(row, "amount", item.amount.to_string()))?;
            out.insert(item.tag.clone(), value)?;
        }
        Ok(out)
    }
}

/// Expense record as served by the backend (`date` still a string).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawExpense {
    pub id: u64,
    pub tag: String,
    pub amount: f64,
    pub date: String,
}

/// Validated expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub tag: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl TryFrom<RawExpense> for Expense {
    type Error = DataError;

    fn try_from(raw: RawExpense) -> Result<Self, Self::Error> {
        let row = usize::try_from(raw.id).unwrap_or(usize::MAX);
        if !raw.amount.is_finite() {
            return Err(DataError::unparsable(row, "amount", raw.amount.to_string()));
        }
        let date = parse_date(&raw.date).ok_or_else(|| DataError::unparsable(row, "date", &raw.date))?;
        Ok(Self {
            id: raw.id,
            tag: raw.tag,
            amount: raw.amount,
            date,
        })
    }
}

/// Parse `YYYY-M-D` (zero padding optional) or an RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// One category total taken from a bank export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub tag: String,
    pub amount: Decimal,
}

impl CostItem {
    pub fn new(tag: &str, amount: Decimal) -> Self {
        Self {
            tag: tag.to_string(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order_and_rejects_duplicates() {
        let mut ds = Dataset::new();
        ds.insert("B", 2.0).unwrap();
        ds.insert("A", 1.0).unwrap();
        assert!(matches!(ds.insert("B", 3.0), Err(DataError::DuplicateLabel(l)) if l == "B"));
        assert_eq!(ds.labels().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(ds.get("A"), Some(1.0));
    }

    #[test]
    fn insert_rejects_non_finite() {
        let mut ds = Dataset::new();
        assert!(matches!(
            ds.insert("x", f64::NAN),
            Err(DataError::UnparsableValue { .. })
        ));
        assert!(ds.is_empty());
    }

    #[test]
    fn expenses_are_summed_per_tag_in_first_seen_order() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let ex = |id, tag: &str, amount| Expense {
            id,
            tag: tag.into(),
            amount,
            date: d,
        };
        let ds = Dataset::from_expenses(&[
            ex(0, "Grocery", 100.0),
            ex(1, "Rent", 800.0),
            ex(2, "Grocery", 25.5),
        ])
        .unwrap();
        assert_eq!(
            ds.iter().collect::<Vec<_>>(),
            vec![("Grocery", 125.5), ("Rent", 800.0)]
        );
    }

    #[test]
    fn overflowing_tag_total_is_rejected() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let ex = |id, tag: &str, amount| Expense {
            id,
            tag: tag.into(),
            amount,
            date: d,
        };
        let err = Dataset::from_expenses(&[
            ex(0, "X", 1e308),
            ex(1, "X", 1e308),
            ex(2, "Y", 5.0),
        ])
        .unwrap_err();
        match err {
            DataError::UnparsableValue { row, field, value } => {
                assert_eq!(row, 1);
                assert_eq!(field, "amount");
                assert_eq!(value, "inf");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cost_items_convert_exactly_to_values() {
        let items = [
            CostItem::new("Food", Decimal::new(-25050, 2)),
            CostItem::new("Rent", Decimal::ZERO),
        ];
        let ds = Dataset::try_from(&items[..]).unwrap();
        assert_eq!(
            ds.iter().collect::<Vec<_>>(),
            vec![("Food", -250.5), ("Rent", 0.0)]
        );
    }

    #[test]
    fn dates_without_zero_padding_parse() {
        assert_eq!(parse_date("2024-5-17"), NaiveDate::from_ymd_opt(2024, 5, 17));
        assert_eq!(parse_date("2024-05-07"), NaiveDate::from_ymd_opt(2024, 5, 7));
        assert_eq!(
            parse_date("2024-05-17T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 5, 17)
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn raw_expense_with_bad_date_is_unparsable() {
        let raw = RawExpense {
            id: 4,
            tag: "Fuel".into(),
            amount: 40.0,
            date: "17/05/2024".into(),
        };
        match Expense::try_from(raw) {
            Err(DataError::UnparsableValue { row, field, value }) => {
                assert_eq!(row, 4);
                assert_eq!(field, "date");
                assert_eq!(value, "17/05/2024");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
