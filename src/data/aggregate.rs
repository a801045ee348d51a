use std::collections::BTreeMap;

use super::model::{Passenger, Sex};

// ---------------------------------------------------------------------------
// Summary counts
// ---------------------------------------------------------------------------

/// Headline numbers shown in the value cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub survivors: usize,
    pub non_survivors: usize,
}

pub fn counts(view: &[&Passenger]) -> Counts {
    let total = view.len();
    let survivors = view.iter().filter(|p| p.survived).count();
    Counts {
        total,
        survivors,
        non_survivors: total - survivors,
    }
}

// ---------------------------------------------------------------------------
// Survival grouped by sex
// ---------------------------------------------------------------------------

/// Outcome counts for one group. A combination absent from the view is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurvivalCounts {
    pub survived: usize,
    pub perished: usize,
}

impl SurvivalCounts {
    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.survived + self.perished
    }
}

/// Group the view by sex, then by outcome. Only sexes present in the view
/// get an entry.
pub fn survival_by_gender(view: &[&Passenger]) -> BTreeMap<Sex, SurvivalCounts> {
    let mut groups: BTreeMap<Sex, SurvivalCounts> = BTreeMap::new();
    for p in view {
        let entry = groups.entry(p.sex).or_default();
        if p.survived {
            entry.survived += 1;
        } else {
            entry.perished += 1;
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// Age distribution
// ---------------------------------------------------------------------------

/// Known ages of the view, in view order.
pub fn age_distribution(view: &[&Passenger]) -> Vec<f64> {
    view.iter().filter_map(|p| p.age).collect()
}

/// One bar of the age histogram, covering `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Bucket `values` into `bins` equal-width bins spanning `[min, max]`.
///
/// The last bin is closed on the right so the maximum is counted. When every
/// value is identical a single unit-width bin centred on it is returned.
pub fn age_histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range.abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: values.len(),
        }];
    }

    let width = range / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}
