//! Framed housekeeping telemetry protocol.
//!
//! hkstream carries time-series instrument housekeeping data as a sequence
//! of typed, ordered frames and validates it on the way back in.
//!
//! # Crate Structure
//!
//! - [`frame`] — Frame taxonomy: the closed set of housekeeping frame
//!   kinds, the block payload type, and the stream record contract
//! - [`session`] — Producer side: session identity and frame templates
//! - [`scan`] — Consumer side: single-pass stream validation and reporting

/// Re-export frame taxonomy types.
pub mod frame {
    pub use hkstream_frame::*;
}

/// Re-export session builder types.
pub mod session {
    pub use hkstream_session::*;
}

/// Re-export scanner types.
pub mod scan {
    pub use hkstream_scan::*;
}
