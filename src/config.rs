use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::ambient::AmbientPolicy;
use crate::models::HISTORY_CAPACITY;
use crate::scoring::FusionWeights;

/// Engine tunables. Hosts usually run the defaults; a JSON file can
/// override individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Period of the mood classifier poll.
    pub mood_poll_ms: u64,
    /// Period of the history ticker.
    pub history_push_ms: u64,
    /// Rolling history length.
    pub history_capacity: usize,
    /// Key the history snapshot is stored under.
    pub history_key: String,
    /// Use the typing-led fusion tuning instead of the camera-led one.
    pub typing_aware: bool,
    pub ambient_policy: AmbientPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mood_poll_ms: 2_000,
            history_push_ms: 5_000,
            history_capacity: HISTORY_CAPACITY,
            history_key: "mindsync.history".to_string(),
            typing_aware: false,
            ambient_policy: AmbientPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Read a config file, falling back to defaults when the file is
    /// missing or unreadable as JSON.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed config at {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn weights(&self) -> FusionWeights {
        if self.typing_aware {
            FusionWeights::typing_aware()
        } else {
            FusionWeights::camera()
        }
    }
}
