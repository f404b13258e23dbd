/// Default tolerance, in time units, between a data frame's own timestamp
/// and the earliest first-sample time of its blocks.
pub const DEFAULT_DATA_TIME_TOLERANCE: f64 = 60.0;

/// Configuration for the stream scanner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Maximum allowed difference between a data frame's timestamp and the
    /// minimum first-sample time across its blocks before the frame is
    /// flagged as inconsistent with its payload.
    pub data_time_tolerance: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            data_time_tolerance: DEFAULT_DATA_TIME_TOLERANCE,
        }
    }
}
