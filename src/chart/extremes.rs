use crate::error::ChartError;

/// Minimum and maximum of a value sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes {
    pub min: f64,
    pub max: f64,
}

impl Extremes {
    /// Largest absolute magnitude of either extreme.
    pub fn magnitude(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }
}

/// Scan `values` once and return their extremes.
///
/// The first value seeds both ends, so a single-element input yields
/// `{ min: v, max: v }` and both ends are always members of the input.
pub fn find_extremes<I>(values: I) -> Result<Extremes, ChartError>
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = values.into_iter();
    let first = iter.next().ok_or(ChartError::EmptyDataset)?;
    let mut extremes = Extremes {
        min: first,
        max: first,
    };
    for v in iter {
        if v <= extremes.min {
            extremes.min = v;
        }
        if v >= extremes.max {
            extremes.max = v;
        }
    }
    Ok(extremes)
}
