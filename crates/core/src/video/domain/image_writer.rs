use std::path::Path;

use crate::shared::frame::Frame;

/// Sink for single still images. The format is chosen from the output
/// path's extension.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
