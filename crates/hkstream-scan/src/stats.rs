use serde::Serialize;

/// Live scanner statistics.
///
/// `n_hk`, `n_other` and `n_session` accumulate across sessions for the
/// lifetime of the scanner; `n_warning` and `n_error` count classified
/// anomalies within the currently open session and are zeroed at finalize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Housekeeping frames seen, including unrecognized subtypes.
    pub n_hk: u64,
    /// Non-housekeeping frames seen.
    pub n_other: u64,
    /// Distinct sessions opened.
    pub n_session: u64,
    /// Structural anomalies in the current session.
    pub n_warning: u64,
    /// Data-consistency anomalies in the current session.
    pub n_error: u64,
}
