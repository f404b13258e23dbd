//! Producer side of the hkstream protocol.
//!
//! A [`SessionBuilder`] owns the identity of one acquisition run and its
//! provider roster, and produces frame templates that satisfy the taxonomy's
//! field requirements: one `session` frame first, then `status` roster
//! snapshots and per-provider `data` frames for as long as the run lasts.
//!
//! The builder is single-owner and synchronous; it performs no I/O and is
//! not meant to be shared across concurrent producers.

pub mod builder;
pub mod error;
pub mod id;

pub use builder::{SessionBuilder, SessionConfig};
pub use error::{Result, SessionError};
pub use id::derive_session_id;
