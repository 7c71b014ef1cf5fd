use std::sync::{Arc, Mutex, PoisonError};

use crate::shared::constants::{DEFAULT_THRESHOLD, DEFAULT_WEIGHTS_FILE};

/// Live processing controls, read by the frame path once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessorConfig {
    /// Master switch. Off means frames pass through untouched.
    pub detection: bool,
    /// Confidence threshold, clamped to `[0.0, 1.0]`.
    pub threshold: f64,
    pub show_score: bool,
    pub show_counter: bool,
    pub weights_file: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            detection: false,
            threshold: DEFAULT_THRESHOLD,
            show_score: false,
            show_counter: true,
            weights_file: DEFAULT_WEIGHTS_FILE.to_string(),
        }
    }
}

/// Shared handle between the UI thread and the frame path.
///
/// Setters apply immediately; the processor snapshots the whole config at
/// the start of each frame, so a frame never sees a half-applied update.
#[derive(Clone, Default)]
pub struct SharedConfig {
    inner: Arc<Mutex<ProcessorConfig>>,
}

impl SharedConfig {
    pub fn new(mut config: ProcessorConfig) -> Self {
        // Same clamp as set_threshold; seed values can come from a
        // hand-edited settings file.
        config.threshold = config.threshold.clamp(0.0, 1.0);
        Self {
            inner: Arc::new(Mutex::new(config)),
        }
    }

    pub fn snapshot(&self) -> ProcessorConfig {
        self.lock().clone()
    }

    pub fn set_detection(&self, enabled: bool) {
        self.lock().detection = enabled;
    }

    pub fn set_threshold(&self, threshold: f64) {
        self.lock().threshold = threshold.clamp(0.0, 1.0);
    }

    pub fn set_show_score(&self, show: bool) {
        self.lock().show_score = show;
    }

    pub fn set_show_counter(&self, show: bool) {
        self.lock().show_counter = show;
    }

    pub fn set_weights_file(&self, weights_file: &str) {
        self.lock().weights_file = weights_file.to_string();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProcessorConfig> {
        // A panicked setter can't leave the config in a torn state (all
        // writes are single-field), so a poisoned lock is safe to reuse.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
