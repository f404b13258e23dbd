use std::collections::{BTreeMap, BTreeSet};

use tracing::{error, info, warn};

use hkstream_frame::{Block, HkFrame, ProviderEntry, StreamRecord};

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::provider::ProviderInfo;
use crate::report::SessionReport;
use crate::stats::ScanStats;

/// Single-pass housekeeping stream validator.
///
/// Feed records in emission order via [`scan`](Self::scan). The scanner
/// maintains at most one open session; a `session` frame with a differing
/// id finalizes the current session before opening the new one, and the
/// end-of-stream sentinel finalizes whatever is open.
///
/// The scanner owns its state exclusively and processes exactly one record
/// at a time; it is not meant for concurrent invocation.
#[derive(Debug, Default)]
pub struct HkScanner {
    session_id: Option<i64>,
    providers: BTreeMap<u32, ProviderInfo>,
    stats: ScanStats,
    config: ScanConfig,
}

impl HkScanner {
    /// Create a scanner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with explicit configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The currently open session, if any.
    pub fn session_id(&self) -> Option<i64> {
        self.session_id
    }

    /// Live statistics.
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// The provider table for the currently open session.
    pub fn providers(&self) -> &BTreeMap<u32, ProviderInfo> {
        &self.providers
    }

    /// Process one record.
    ///
    /// Anomalies never abort the scan: they are logged at their severity
    /// and tallied in the statistics, and the record is left untouched for
    /// any downstream stage. When this record closed a session (a `session`
    /// frame with a new id, or end of stream), the finalized report is
    /// returned. The only error condition is a data frame referencing a
    /// provider id never announced by a prior status frame; scanner state
    /// for all other providers is unaffected by it.
    pub fn scan(&mut self, record: &StreamRecord) -> Result<Option<SessionReport>> {
        match record {
            StreamRecord::EndOfStream => Ok(self.finalize()),
            StreamRecord::Other => {
                self.stats.n_other += 1;
                Ok(None)
            }
            StreamRecord::UnknownHousekeeping { kind } => {
                self.stats.n_hk += 1;
                warn!(%kind, "unrecognized housekeeping frame subtype");
                self.stats.n_warning += 1;
                Ok(None)
            }
            StreamRecord::Housekeeping(frame) => {
                self.stats.n_hk += 1;
                match frame {
                    HkFrame::Session {
                        session_id,
                        start_time,
                        ..
                    } => Ok(self.on_session(*session_id, *start_time)),
                    HkFrame::Status {
                        timestamp,
                        providers,
                        ..
                    } => {
                        self.on_status(*timestamp, providers);
                        Ok(None)
                    }
                    HkFrame::Data {
                        prov_id,
                        timestamp,
                        blocks,
                        ..
                    } => self.on_data(*prov_id, *timestamp, blocks).map(|()| None),
                }
            }
        }
    }

    /// Close the open session: log the report, return it, and reset
    /// per-session state. Cumulative counters are retained; warning and
    /// error counts start over, and the provider table is session-local.
    pub fn finalize(&mut self) -> Option<SessionReport> {
        let session_id = self.session_id.take()?;
        let report = SessionReport {
            session_id,
            stats: self.stats,
            providers: std::mem::take(&mut self.providers),
        };
        info!(
            session_id,
            n_hk = report.stats.n_hk,
            n_other = report.stats.n_other,
            n_session = report.stats.n_session,
            n_warning = report.stats.n_warning,
            n_error = report.stats.n_error,
            providers = ?report.providers,
            "session closed"
        );
        self.stats.n_warning = 0;
        self.stats.n_error = 0;
        Some(report)
    }

    fn on_session(&mut self, session_id: i64, start_time: f64) -> Option<SessionReport> {
        let mut closed = None;
        if let Some(open) = self.session_id {
            if open == session_id {
                // Idempotent re-announce.
                return None;
            }
            closed = self.finalize();
        }
        info!(session_id, start_time, "new housekeeping session");
        self.session_id = Some(session_id);
        self.stats.n_session += 1;
        closed
    }

    fn on_status(&mut self, timestamp: f64, roster: &[ProviderEntry]) {
        let incoming: BTreeSet<u32> = roster.iter().map(|entry| entry.prov_id).collect();

        // Disappearance is a lifecycle change, not an anomaly.
        for (prov_id, info) in self.providers.iter_mut() {
            if !incoming.contains(prov_id) {
                info.active = false;
            }
        }

        for entry in roster {
            match self.providers.get_mut(&entry.prov_id) {
                None => {
                    self.providers
                        .insert(entry.prov_id, ProviderInfo::announced(timestamp));
                }
                Some(info) if !info.active => {
                    warn!(prov_id = entry.prov_id, "provider came back to life");
                    self.stats.n_warning += 1;
                    info.n_active += 1;
                    info.active = true;
                }
                Some(_) => {}
            }
        }
    }

    fn on_data(&mut self, prov_id: u32, timestamp: f64, blocks: &[Block]) -> Result<()> {
        let info = self
            .providers
            .get_mut(&prov_id)
            .ok_or(ScanError::UnknownProvider(prov_id))?;
        info.n_frames += 1;

        match info.timestamp_data {
            None => {
                if timestamp < info.timestamp_init {
                    warn!(
                        prov_id,
                        timestamp,
                        timestamp_init = info.timestamp_init,
                        "data timestamp precedes provider announcement"
                    );
                    self.stats.n_warning += 1;
                }
            }
            Some(previous) if timestamp <= previous => {
                warn!(
                    prov_id,
                    timestamp, previous, "data frame timestamps are not strictly ordered"
                );
                self.stats.n_warning += 1;
            }
            Some(_) => {}
        }
        info.timestamp_data = Some(timestamp);

        let mut earliest_sample: Option<f64> = None;
        for block in blocks {
            if let Some((first, last)) = block.time_span() {
                info.extend_span(first, last);
                earliest_sample = Some(match earliest_sample {
                    None => first,
                    Some(t) => t.min(first),
                });
            }
            info.ticks += block.t.len() as u64;

            for (field, samples) in &block.data {
                if samples.len() != block.t.len() {
                    error!(
                        prov_id,
                        %field,
                        n_samples = samples.len(),
                        n_ticks = block.t.len(),
                        "field sample count does not match block time vector"
                    );
                    self.stats.n_error += 1;
                }
            }
        }

        if let Some(earliest) = earliest_sample {
            if (earliest - timestamp).abs() > self.config.data_time_tolerance {
                warn!(
                    prov_id,
                    timestamp, earliest, "frame timestamp does not correspond to data timestamps"
                );
                self.stats.n_warning += 1;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hkstream_session::{SessionBuilder, SessionConfig};

    use super::*;

    fn hk(frame: HkFrame) -> StreamRecord {
        StreamRecord::Housekeeping(frame)
    }

    fn session_record(session_id: i64) -> StreamRecord {
        hk(HkFrame::Session {
            session_id,
            start_time: 100.0,
            description: "test agent".to_string(),
        })
    }

    fn status_record(timestamp: f64, prov_ids: &[u32]) -> StreamRecord {
        hk(HkFrame::Status {
            session_id: 1,
            timestamp,
            providers: prov_ids
                .iter()
                .map(|&prov_id| ProviderEntry {
                    prov_id,
                    description: format!("prov-{prov_id}"),
                })
                .collect(),
        })
    }

    fn data_record(prov_id: u32, timestamp: f64, blocks: Vec<Block>) -> StreamRecord {
        hk(HkFrame::Data {
            session_id: 1,
            prov_id,
            timestamp,
            blocks,
        })
    }

    fn block_at(t0: f64, n: usize) -> Block {
        let t: Vec<f64> = (0..n).map(|i| t0 + i as f64).collect();
        let samples = vec![1.0; n];
        Block::from_fields(t, [("value", samples)])
    }

    #[test]
    fn clean_builder_stream_scans_without_concerns() {
        let mut session = SessionBuilder::with_config(SessionConfig {
            session_id: Some(1),
            start_time: Some(100.0),
            description: "round trip".to_string(),
        });
        let prov = session.register_provider("thermometry");

        let mut scanner = HkScanner::new();
        scanner.scan(&hk(session.session_frame())).unwrap();
        scanner.scan(&hk(session.status_frame(Some(100.0)))).unwrap();
        for i in 0..5 {
            let timestamp = 101.0 + i as f64 * 10.0;
            let frame = session.data_frame_with_blocks(
                prov,
                Some(timestamp),
                vec![block_at(timestamp, 10)],
            );
            scanner.scan(&hk(frame)).unwrap();
        }

        assert_eq!(scanner.stats().n_warning, 0);
        assert_eq!(scanner.stats().n_error, 0);
        assert_eq!(scanner.stats().n_hk, 7);

        let report = scanner.finalize().expect("session should be open");
        assert_eq!(report.session_id, 1);
        let info = &report.providers[&prov];
        assert_eq!(info.n_frames, 5);
        assert_eq!(info.ticks, 50);
        assert_eq!(info.span, Some((101.0, 150.0)));
        assert_eq!(info.timestamp_data, Some(141.0));
    }

    #[test]
    fn end_of_stream_finalizes_open_session() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        let report = scanner.scan(&StreamRecord::EndOfStream).unwrap();
        assert_eq!(report.expect("report at end of stream").session_id, 1);
        assert_eq!(scanner.session_id(), None);
        // Nothing left to finalize.
        assert!(scanner.finalize().is_none());
    }

    #[test]
    fn end_of_stream_without_session_is_quiet() {
        let mut scanner = HkScanner::new();
        scanner.scan(&StreamRecord::EndOfStream).unwrap();
        assert_eq!(scanner.stats().n_session, 0);
    }

    #[test]
    fn session_reannounce_is_idempotent() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&session_record(1)).unwrap();
        assert_eq!(scanner.stats().n_session, 1);
        assert_eq!(scanner.stats().n_hk, 2);
    }

    #[test]
    fn session_switch_finalizes_and_resets_concerns() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner
            .scan(&StreamRecord::UnknownHousekeeping {
                kind: "heartbeat".to_string(),
            })
            .unwrap();
        assert_eq!(scanner.stats().n_warning, 1);

        let report = scanner.scan(&session_record(2)).unwrap();
        assert_eq!(report.expect("switch closes the session").session_id, 1);
        assert_eq!(scanner.session_id(), Some(2));
        assert_eq!(scanner.stats().n_session, 2);
        assert_eq!(scanner.stats().n_warning, 0);
        assert_eq!(scanner.stats().n_error, 0);
        // Cumulative counters persist across the switch.
        assert_eq!(scanner.stats().n_hk, 3);
    }

    #[test]
    fn provider_table_is_session_local() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();
        scanner.scan(&session_record(2)).unwrap();

        assert!(scanner.providers().is_empty());
        let result = scanner.scan(&data_record(0, 101.0, vec![]));
        assert!(matches!(result, Err(ScanError::UnknownProvider(0))));
    }

    #[test]
    fn provider_reactivation_warns_once() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();
        scanner.scan(&status_record(110.0, &[])).unwrap();
        assert!(!scanner.providers()[&0].active);
        assert_eq!(scanner.stats().n_warning, 0);

        scanner.scan(&status_record(120.0, &[0])).unwrap();
        let info = &scanner.providers()[&0];
        assert!(info.active);
        assert_eq!(info.n_active, 2);
        assert_eq!(info.timestamp_init, 100.0);
        assert_eq!(scanner.stats().n_warning, 1);
    }

    #[test]
    fn steady_roster_does_not_warn() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0, 1])).unwrap();
        scanner.scan(&status_record(110.0, &[0, 1])).unwrap();
        assert_eq!(scanner.stats().n_warning, 0);
        assert_eq!(scanner.providers()[&1].n_active, 1);
    }

    #[test]
    fn field_length_mismatch_is_an_error_per_field() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();

        let bad = Block::from_fields(
            vec![100.0, 101.0, 102.0, 103.0, 104.0],
            [("short", vec![0.0; 4]), ("ok", vec![0.0; 5])],
        );
        let trailing = block_at(105.0, 3);
        scanner
            .scan(&data_record(0, 100.0, vec![bad, trailing]))
            .unwrap();

        assert_eq!(scanner.stats().n_error, 1);
        // The frame keeps being processed after the mismatch.
        let info = &scanner.providers()[&0];
        assert_eq!(info.ticks, 8);
        assert_eq!(info.span, Some((100.0, 107.0)));

        // And so does the rest of the stream.
        scanner
            .scan(&data_record(0, 110.0, vec![block_at(110.0, 2)]))
            .unwrap();
        assert_eq!(scanner.providers()[&0].n_frames, 2);
        assert_eq!(scanner.stats().n_error, 1);
    }

    #[test]
    fn multiple_mismatched_fields_raise_multiple_errors() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();

        let bad = Block::from_fields(
            vec![100.0, 101.0],
            [("a", vec![0.0; 1]), ("b", vec![0.0; 3])],
        );
        scanner.scan(&data_record(0, 100.0, vec![bad])).unwrap();
        assert_eq!(scanner.stats().n_error, 2);
    }

    #[test]
    fn non_increasing_timestamps_warn_on_second_frame() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();

        scanner
            .scan(&data_record(0, 110.0, vec![block_at(110.0, 2)]))
            .unwrap();
        assert_eq!(scanner.stats().n_warning, 0);

        scanner
            .scan(&data_record(0, 110.0, vec![block_at(110.0, 2)]))
            .unwrap();
        assert_eq!(scanner.stats().n_warning, 1);

        // timestamp_data was still updated, so a later frame is clean again.
        scanner
            .scan(&data_record(0, 120.0, vec![block_at(120.0, 2)]))
            .unwrap();
        assert_eq!(scanner.stats().n_warning, 1);
    }

    #[test]
    fn first_data_frame_before_announcement_warns() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();

        scanner
            .scan(&data_record(0, 90.0, vec![block_at(90.0, 2)]))
            .unwrap();
        assert_eq!(scanner.stats().n_warning, 1);
    }

    #[test]
    fn frame_timestamp_far_from_samples_warns() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();

        // First sample 61 units after the frame timestamp: outside tolerance.
        scanner
            .scan(&data_record(0, 100.0, vec![block_at(161.0, 2)]))
            .unwrap();
        assert_eq!(scanner.stats().n_warning, 1);

        // Exactly at the default tolerance: fine.
        scanner
            .scan(&data_record(0, 200.0, vec![block_at(260.0, 2)]))
            .unwrap();
        assert_eq!(scanner.stats().n_warning, 1);
    }

    #[test]
    fn tolerance_is_configurable() {
        let mut scanner = HkScanner::with_config(ScanConfig {
            data_time_tolerance: 5.0,
        });
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();
        scanner
            .scan(&data_record(0, 100.0, vec![block_at(110.0, 2)]))
            .unwrap();
        assert_eq!(scanner.stats().n_warning, 1);
    }

    #[test]
    fn empty_blocks_skip_the_cross_check() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();
        scanner.scan(&data_record(0, 101.0, vec![Block::new()])).unwrap();

        assert_eq!(scanner.stats().n_warning, 0);
        let info = &scanner.providers()[&0];
        assert_eq!(info.ticks, 0);
        assert_eq!(info.span, None);
    }

    #[test]
    fn unknown_subtype_is_a_warning() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner
            .scan(&StreamRecord::UnknownHousekeeping {
                kind: "heartbeat".to_string(),
            })
            .unwrap();
        assert_eq!(scanner.stats().n_warning, 1);
        assert_eq!(scanner.stats().n_hk, 2);
    }

    #[test]
    fn other_frames_are_counted_and_ignored() {
        let mut scanner = HkScanner::new();
        scanner.scan(&StreamRecord::Other).unwrap();
        scanner.scan(&StreamRecord::Other).unwrap();
        assert_eq!(scanner.stats().n_other, 2);
        assert_eq!(scanner.stats().n_hk, 0);
    }

    #[test]
    fn unknown_provider_is_surfaced_without_corrupting_state() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();

        let result = scanner.scan(&data_record(7, 101.0, vec![block_at(101.0, 2)]));
        assert!(matches!(result, Err(ScanError::UnknownProvider(7))));

        // The known provider is untouched and the scan can continue.
        scanner
            .scan(&data_record(0, 102.0, vec![block_at(102.0, 2)]))
            .unwrap();
        assert_eq!(scanner.providers()[&0].n_frames, 1);
    }

    #[test]
    fn report_snapshot_matches_stats_at_close() {
        let mut scanner = HkScanner::new();
        scanner.scan(&session_record(1)).unwrap();
        scanner.scan(&status_record(100.0, &[0])).unwrap();
        scanner.scan(&status_record(110.0, &[])).unwrap();
        scanner.scan(&status_record(120.0, &[0])).unwrap();

        let report = scanner.finalize().unwrap();
        assert_eq!(report.stats.n_warning, 1);
        assert_eq!(report.providers.len(), 1);
        assert_eq!(scanner.stats().n_warning, 0);
        assert_eq!(scanner.stats().n_hk, 4);
    }
}
