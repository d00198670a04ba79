//! Player preferences.
//!
//! The host persists these wherever it likes (localStorage, a dotfile); the
//! core only defines the schema and the JSON round-trip. Unknown fields in
//! stored JSON are ignored so older saves keep loading.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub muted: bool,
    /// Linear gain in `[0, 1]`
    pub master_volume: f32,
    pub effects_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 1.0,
            effects_volume: 0.8,
        }
    }
}

impl Settings {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse stored settings, clamping volumes back into range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut s: Settings = serde_json::from_str(json)?;
        s.master_volume = s.master_volume.clamp(0.0, 1.0);
        s.effects_volume = s.effects_volume.clamp(0.0, 1.0);
        Ok(s)
    }
}
