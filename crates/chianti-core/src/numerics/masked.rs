//! Per-element validity for values that are only defined on part of a domain.
//!
//! A masked entry means "outside the physical domain, do not use". It is not
//! the same as zero; callers that need a dense array choose a fill value
//! explicitly through [`MaskedSeries::filled`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaskedSeries {
    values: Vec<Option<f64>>,
}

impl MaskedSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    /// Evaluate `kernel` on every input accepted by `is_valid`; the rest are masked.
    pub fn from_fn(
        inputs: &[f64],
        is_valid: impl Fn(f64) -> bool,
        kernel: impl Fn(f64) -> f64,
    ) -> Self {
        let values = inputs
            .iter()
            .map(|&input| is_valid(input).then(|| kernel(input)))
            .collect();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn is_masked(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(None))
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Dense copy with masked entries replaced by `fill_value`.
    pub fn filled(&self, fill_value: f64) -> Vec<f64> {
        self.values
            .iter()
            .map(|value| value.unwrap_or(fill_value))
            .collect()
    }
}

impl FromIterator<Option<f64>> for MaskedSeries {
    fn from_iter<T: IntoIterator<Item = Option<f64>>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
