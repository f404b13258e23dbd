use serde_json::Value;

use crate::error::{FrameError, Result};
use crate::frame::{FrameKind, HkFrame};

/// One record from the frame-I/O layer, as seen by a stream consumer.
///
/// The transport delivers an ordered, possibly infinite sequence of typed
/// records; housekeeping frames are parsed into the closed taxonomy, and
/// everything else is preserved just enough for the scanner to count and
/// classify it.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamRecord {
    /// A well-formed housekeeping frame.
    Housekeeping(HkFrame),
    /// A frame in the housekeeping family whose kind tag is not part of
    /// the taxonomy. The scanner classifies this as a warning.
    UnknownHousekeeping { kind: String },
    /// A frame outside the housekeeping family. Counted and passed through.
    Other,
    /// Sentinel signaling completion of the stream.
    EndOfStream,
}

impl StreamRecord {
    /// Interpret a flat key-value record as a stream record.
    ///
    /// Objects without an `hkagg_type` key are non-housekeeping frames.
    /// A recognized kind tag that fails to parse is a hard error: the
    /// record claimed to be protocol traffic but is unusable.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| FrameError::Malformed("record is not a key-value object".into()))?;

        let tag = match map.get("hkagg_type") {
            None => return Ok(StreamRecord::Other),
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(FrameError::Malformed(format!(
                    "hkagg_type is not a string: {other}"
                )))
            }
        };

        match FrameKind::from_tag(tag) {
            Some(_) => Ok(StreamRecord::Housekeeping(serde_json::from_value(
                value.clone(),
            )?)),
            None => Ok(StreamRecord::UnknownHousekeeping { kind: tag.clone() }),
        }
    }
}
