use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use kinotake_core::shared::constants::DEFAULT_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightsFile {
    V1,
    V2,
    V3,
}

impl WeightsFile {
    pub const ALL: &[WeightsFile] = &[WeightsFile::V1, WeightsFile::V2, WeightsFile::V3];

    pub fn file_name(self) -> &'static str {
        match self {
            WeightsFile::V1 => "kinotake_ssd_v1.pth",
            WeightsFile::V2 => "kinotake_ssd_v2.pth",
            WeightsFile::V3 => "kinotake_ssd_v3.pth",
        }
    }
}

impl std::fmt::Display for WeightsFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Persisted UI settings.
///
/// The detection switch is deliberately not part of this: every session
/// starts with detection off and the camera feed passing through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub source: String,
    pub threshold: f64,
    pub show_score: bool,
    pub show_counter: bool,
    pub weights: WeightsFile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: default_source(),
            threshold: DEFAULT_THRESHOLD,
            show_score: false,
            show_counter: true,
            weights: WeightsFile::V3,
        }
    }
}

fn default_source() -> String {
    if cfg!(target_os = "linux") {
        "/dev/video0".to_string()
    } else {
        "0".to_string()
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Kinotake").join("settings.json"))
    }

    pub fn load() -> Self {
        let mut settings: Settings = Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        // A hand-edited file can hold any number; keep the slider range.
        settings.threshold = settings.threshold.clamp(0.0, 1.0);
        settings
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                let _ = fs::write(path, json);
            }
        }
    }
}
