use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named bundle of co-timed time series within one data frame.
///
/// All fields share the time vector `t`; a well-formed block has every
/// field's sample count equal to `t.len()`. A mismatch does not make the
/// frame unparseable, it is a data-consistency violation for the scanner
/// to flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Shared time vector, strictly increasing.
    pub t: Vec<f64>,
    /// Field name to sample sequence, each the same length as `t`.
    pub data: BTreeMap<String, Vec<f64>>,
}

impl Block {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block from a time vector and named field vectors.
    pub fn from_fields<S: Into<String>>(
        t: Vec<f64>,
        fields: impl IntoIterator<Item = (S, Vec<f64>)>,
    ) -> Self {
        Self {
            t,
            data: fields
                .into_iter()
                .map(|(name, samples)| (name.into(), samples))
                .collect(),
        }
    }

    /// True when every field has exactly as many samples as `t`.
    pub fn is_consistent(&self) -> bool {
        self.data.values().all(|samples| samples.len() == self.t.len())
    }

    /// First and last sample time, or `None` for an empty time vector.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        match (self.t.first(), self.t.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }
}
