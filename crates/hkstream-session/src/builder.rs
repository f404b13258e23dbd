use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use hkstream_frame::{Block, HkFrame, ProviderEntry};

use crate::error::{Result, SessionError};
use crate::id::derive_session_id;

/// Configuration for a new housekeeping session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Explicit session id. Derived from `start_time`, the process id and
    /// the description when omitted (recommended).
    pub session_id: Option<i64>,
    /// Session start timestamp in seconds since epoch. Defaults to now.
    pub start_time: Option<f64>,
    /// Free-text description of the agent producing the stream.
    pub description: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: None,
            start_time: None,
            description: "No description provided.".to_string(),
        }
    }
}

/// Producer-side helper for one housekeeping session.
///
/// Allocates the session identity, tracks the provider roster, and emits
/// frame templates conforming to the taxonomy. Provider ids are assigned
/// sequentially from 0 and never reused, even after removal, so that a
/// consumer can track provider lifecycle unambiguously.
#[derive(Debug)]
pub struct SessionBuilder {
    session_id: i64,
    start_time: f64,
    description: String,
    providers: BTreeMap<u32, String>,
    next_prov_id: u32,
}

impl SessionBuilder {
    /// Create a session with a description and default configuration.
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_config(SessionConfig {
            description: description.into(),
            ..SessionConfig::default()
        })
    }

    /// Create a session with explicit configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        let start_time = config.start_time.unwrap_or_else(now);
        let session_id = config
            .session_id
            .unwrap_or_else(|| derive_session_id(start_time, &config.description));
        debug!(session_id, start_time, "session created");
        Self {
            session_id,
            start_time,
            description: config.description,
            providers: BTreeMap::new(),
            next_prov_id: 0,
        }
    }

    /// The session id, explicit or derived.
    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    /// The session start timestamp.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// The session description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current roster, ordered by ascending provider id.
    pub fn providers(&self) -> impl Iterator<Item = (u32, &str)> {
        self.providers
            .iter()
            .map(|(&prov_id, description)| (prov_id, description.as_str()))
    }

    /// Register a provider and return its id.
    ///
    /// Ids are issued sequentially starting at 0 and are never reused.
    pub fn register_provider(&mut self, description: impl Into<String>) -> u32 {
        let prov_id = self.next_prov_id;
        self.next_prov_id += 1;
        self.providers.insert(prov_id, description.into());
        debug!(prov_id, "provider registered");
        prov_id
    }

    /// Remove a provider from the roster; subsequent status frames omit it.
    pub fn remove_provider(&mut self, prov_id: u32) -> Result<()> {
        match self.providers.remove(&prov_id) {
            Some(_) => {
                debug!(prov_id, "provider removed");
                Ok(())
            }
            None => Err(SessionError::UnknownProvider(prov_id)),
        }
    }

    /// The session frame. Must be emitted exactly once, before all other
    /// frames of this session.
    pub fn session_frame(&self) -> HkFrame {
        HkFrame::Session {
            session_id: self.session_id,
            start_time: self.start_time,
            description: self.description.clone(),
        }
    }

    /// A status frame carrying the complete current roster, ordered by
    /// ascending provider id.
    pub fn status_frame(&self, timestamp: Option<f64>) -> HkFrame {
        HkFrame::Status {
            session_id: self.session_id,
            timestamp: timestamp.unwrap_or_else(now),
            providers: self
                .providers
                .iter()
                .map(|(&prov_id, description)| ProviderEntry {
                    prov_id,
                    description: description.clone(),
                })
                .collect(),
        }
    }

    /// A data frame template with an empty block list. The caller appends
    /// blocks before transmission; `prov_id` must reference a provider
    /// announced in the most recent status frame.
    pub fn data_frame(&self, prov_id: u32, timestamp: Option<f64>) -> HkFrame {
        HkFrame::Data {
            session_id: self.session_id,
            prov_id,
            timestamp: timestamp.unwrap_or_else(now),
            blocks: Vec::new(),
        }
    }

    /// Convenience: a data frame pre-populated with blocks.
    pub fn data_frame_with_blocks(
        &self,
        prov_id: u32,
        timestamp: Option<f64>,
        blocks: Vec<Block>,
    ) -> HkFrame {
        HkFrame::Data {
            session_id: self.session_id,
            prov_id,
            timestamp: timestamp.unwrap_or_else(now),
            blocks,
        }
    }
}

fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
