use crate::detection::domain::frame_annotator::AnnotateOptions;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Draws detection results onto a frame in place: bounding boxes, class
/// labels (with scores when enabled) and the per-class counter banner.
///
/// Rendering is pure pixel work; it never fails, so there is no Result.
pub trait OverlayRenderer: Send {
    fn render(&self, frame: &mut Frame, detections: &[Detection], options: &AnnotateOptions);
}
