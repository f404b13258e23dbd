use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::{FrameError, Result};

/// The closed set of housekeeping frame kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Session,
    Status,
    Data,
}

impl FrameKind {
    /// Wire-level tag name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            FrameKind::Session => "session",
            FrameKind::Status => "status",
            FrameKind::Data => "data",
        }
    }

    /// Resolve a wire tag to a kind, if recognized.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "session" => Some(FrameKind::Session),
            "status" => Some(FrameKind::Status),
            "data" => Some(FrameKind::Data),
            _ => None,
        }
    }
}

/// One provider descriptor as carried in a status frame roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub prov_id: u32,
    pub description: String,
}

/// A typed housekeeping frame.
///
/// The `hkagg_type` tag and the field names below are the wire contract;
/// they must be reproduced exactly for interoperability with other
/// producers and consumers of housekeeping streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "hkagg_type", rename_all = "lowercase")]
pub enum HkFrame {
    /// Opens a housekeeping session. Must precede all other frames of the
    /// session in the stream.
    Session {
        session_id: i64,
        start_time: f64,
        description: String,
    },
    /// Complete snapshot of the currently connected providers, ordered by
    /// ascending `prov_id`. Presence relative to the previous status frame
    /// is the sole signal of provider lifecycle changes.
    Status {
        session_id: i64,
        timestamp: f64,
        providers: Vec<ProviderEntry>,
    },
    /// Time-series payload for one provider.
    Data {
        session_id: i64,
        prov_id: u32,
        timestamp: f64,
        blocks: Vec<Block>,
    },
}

impl HkFrame {
    /// The kind of this frame.
    pub fn kind(&self) -> FrameKind {
        match self {
            HkFrame::Session { .. } => FrameKind::Session,
            HkFrame::Status { .. } => FrameKind::Status,
            HkFrame::Data { .. } => FrameKind::Data,
        }
    }

    /// Append a block to a data frame template.
    ///
    /// Returns [`FrameError::NotADataFrame`] for the other kinds.
    pub fn push_block(&mut self, block: Block) -> Result<()> {
        match self {
            HkFrame::Data { blocks, .. } => {
                blocks.push(block);
                Ok(())
            }
            other => Err(FrameError::NotADataFrame(other.kind().name())),
        }
    }
}
