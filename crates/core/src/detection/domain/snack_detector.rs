use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Domain interface for package detection.
///
/// The frame must be RGB. The threshold is passed per call because the UI
/// slider changes it while a capture session is running. Implementations may
/// be stateful, hence `&mut self`.
pub trait SnackDetector: Send {
    fn detect(
        &mut self,
        frame: &Frame,
        confidence_threshold: f64,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
