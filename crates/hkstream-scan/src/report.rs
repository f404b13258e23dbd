use std::collections::BTreeMap;

use serde::Serialize;

use crate::provider::ProviderInfo;
use crate::stats::ScanStats;

/// Final report for one closed session.
///
/// Produced by [`HkScanner::finalize`](crate::HkScanner::finalize) when a
/// session closes, either because a frame for a different session arrived
/// or because the stream ended. The statistics are a snapshot taken at
/// close; the provider table is moved out of the scanner.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// The session that just closed.
    pub session_id: i64,
    /// Statistics at the moment the session closed.
    pub stats: ScanStats,
    /// Full provider table, keyed by provider id.
    pub providers: BTreeMap<u32, ProviderInfo>,
}
