use serde::Serialize;

/// Consumer-side bookkeeping for one provider within a session.
///
/// Entries are never deleted from the provider table, only marked inactive,
/// so that a provider disappearing from the roster and later re-announcing
/// itself (a resurrection) is detectable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderInfo {
    /// Whether the most recent status frame listed this provider.
    pub active: bool,
    /// Number of times this provider became active. Starts at 1.
    pub n_active: u64,
    /// Data frames seen for this provider.
    pub n_frames: u64,
    /// Timestamp of the status frame that first announced this provider.
    pub timestamp_init: f64,
    /// Timestamp of the most recent data frame, if any.
    pub timestamp_data: Option<f64>,
    /// Total number of time samples across all blocks.
    pub ticks: u64,
    /// Earliest and latest observed sample time.
    pub span: Option<(f64, f64)>,
}

impl ProviderInfo {
    /// Fresh bookkeeping for a provider first announced at `timestamp`.
    pub fn announced(timestamp: f64) -> Self {
        Self {
            active: true,
            n_active: 1,
            n_frames: 0,
            timestamp_init: timestamp,
            timestamp_data: None,
            ticks: 0,
            span: None,
        }
    }

    /// Fold a block's first and last sample time into the running span.
    pub fn extend_span(&mut self, first: f64, last: f64) {
        self.span = Some(match self.span {
            None => (first, last),
            Some((lo, hi)) => (lo.min(first), hi.max(last)),
        });
    }
}
