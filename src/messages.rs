use crate::record::CodeReaderResults;
use serde::{Deserialize, Serialize};

/// Header metadata attached to every scan message
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Header {
    /// Reader identifier from the configuration (e.g., "tcr0")
    pub sensor_id: String,
    /// Sequence number for message ordering
    pub seq: u64,
    /// UTC timestamp in nanoseconds
    pub t_utc_ns: u64,
    /// Message schema version for evolution
    pub schema_v: u16,
}

impl Header {
    /// Create a new header stamped with the current time
    pub fn new(sensor_id: String, seq: u64) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let now_utc = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        Self {
            sensor_id,
            seq,
            t_utc_ns: now_utc,
            schema_v: 1,
        }
    }
}

/// One decoded code as read from the device
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CodeMessage {
    pub h: Header,
    /// Number of content bytes reported (after clamping)
    pub content_length: u16,
    /// Content as text; invalid UTF-8 sequences are replaced
    pub content: String,
}

impl CodeMessage {
    pub fn from_results(h: Header, results: &CodeReaderResults) -> Self {
        Self {
            h,
            content_length: results.content().len() as u16,
            content: results.content_lossy().into_owned(),
        }
    }

    /// Serialize to a single JSON line
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
