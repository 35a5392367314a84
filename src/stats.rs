use crate::models::Dataset;
use serde::{Deserialize, Serialize};

/// Summary statistics for a dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// Sum of all values (the "total difference" of a comparison).
    pub total: f64,
    pub positive_total: f64,
    pub negative_total: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

/// Compute totals and extremes over the dataset values.
pub fn summarize(dataset: &Dataset) -> Summary {
    let count = dataset.len();
    let total: f64 = dataset.values().sum();
    let positive_total = dataset.values().filter(|v| *v > 0.0).sum();
    let negative_total = dataset.values().filter(|v| *v < 0.0).sum();
    let min = dataset.values().reduce(f64::min);
    let max = dataset.values().reduce(f64::max);
    let mean = if count > 0 {
        Some(total / count as f64)
    } else {
        None
    };
    Summary {
        count,
        total,
        positive_total,
        negative_total,
        min,
        max,
        mean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_split_by_sign() {
        let ds = Dataset::try_from(vec![
            ("A".to_string(), 10.0),
            ("B".to_string(), -20.0),
            ("C".to_string(), 5.0),
        ])
        .unwrap();
        let s = summarize(&ds);
        assert_eq!(s.count, 3);
        assert_eq!(s.total, -5.0);
        assert_eq!(s.positive_total, 15.0);
        assert_eq!(s.negative_total, -20.0);
        assert_eq!(s.min, Some(-20.0));
        assert_eq!(s.max, Some(10.0));
        assert!((s.mean.unwrap() + 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_dataset_has_no_extremes() {
        let s = summarize(&Dataset::new());
        assert_eq!(s.count, 0);
        assert_eq!(s.total, 0.0);
        assert_eq!(s.min, None);
        assert_eq!(s.mean, None);
    }
}
