//! Typed housekeeping frame taxonomy for telemetry streams.
//!
//! This is the shared vocabulary of the hkstream protocol. Every housekeeping
//! frame is one of three kinds, distinguished by the `hkagg_type` tag:
//! - `session`: opens an acquisition run and binds its `session_id`
//! - `status`: a complete snapshot of the current provider roster
//! - `data`: a bundle of co-timed time-series blocks for one provider
//!
//! The set is closed: producers may only emit these kinds, and consumers
//! match exhaustively on them. Anything else arriving under the housekeeping
//! frame family is a protocol anomaly for the scanner to classify.

pub mod block;
pub mod error;
pub mod frame;
pub mod record;

pub use block::Block;
pub use error::{FrameError, Result};
pub use frame::{FrameKind, HkFrame, ProviderEntry};
pub use record::StreamRecord;
