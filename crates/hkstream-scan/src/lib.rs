//! Consumer/validator side of the hkstream protocol.
//!
//! [`HkScanner`] walks an inbound frame sequence in strict emission order,
//! reconstructs session and provider state, and classifies protocol
//! anomalies without aborting the stream: structural anomalies (unrecognized
//! subtypes, out-of-order timestamps, provider reactivation) are warnings,
//! data-consistency anomalies (field/time-vector length mismatch) are
//! errors. Every anomaly is logged at its severity and tallied in
//! [`ScanStats`]; the frame always passes through unchanged.
//!
//! Exactly one logical session is open at a time. A `session` frame with a
//! new id, or end of stream, finalizes the open session into a
//! [`SessionReport`] and resets per-session state.

pub mod config;
pub mod error;
pub mod provider;
pub mod report;
pub mod scanner;
pub mod stats;

pub use config::{ScanConfig, DEFAULT_DATA_TIME_TOLERANCE};
pub use error::{Result, ScanError};
pub use provider::ProviderInfo;
pub use report::SessionReport;
pub use scanner::HkScanner;
pub use stats::ScanStats;
