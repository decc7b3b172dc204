//! Alert sound configuration

use serde::{Deserialize, Serialize};

/// Configuration for the sound played when the countdown runs out
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlertSoundConfig {
    /// Whether sound is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Custom sound file path (None = use system alert)
    #[serde(default)]
    pub custom_sound_path: Option<String>,

    /// Whether to loop the sound until the alert is dismissed
    #[serde(default = "default_true")]
    pub loop_sound: bool,

    /// Volume level (0.0 to 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_true() -> bool {
    true
}

fn default_volume() -> f32 {
    0.8
}

impl Default for AlertSoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            custom_sound_path: None,
            loop_sound: true,
            volume: default_volume(),
        }
    }
}

impl AlertSoundConfig {
    /// A configuration with sound switched off
    pub fn muted() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
