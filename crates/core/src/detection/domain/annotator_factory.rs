use super::frame_annotator::FrameAnnotator;

/// Builds an annotator for a named weights file.
///
/// The frame processor calls this lazily: on the first detection-enabled
/// frame, and again whenever the configured weights file changes mid-session.
/// Unknown weights names are an error, not a fallback.
pub trait AnnotatorFactory: Send {
    fn build(
        &self,
        weights_file: &str,
    ) -> Result<Box<dyn FrameAnnotator>, Box<dyn std::error::Error>>;
}
