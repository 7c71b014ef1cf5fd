use crate::detection::domain::frame_annotator::{AnnotateOptions, FrameAnnotator};
use crate::detection::domain::snack_detector::SnackDetector;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::shared::frame::{Frame, PixelFormat};

/// Detect-then-draw annotator: runs a detector over the frame and renders
/// boxes, labels and the class counter onto a copy.
pub struct DetectAnnotator {
    detector: Box<dyn SnackDetector>,
    renderer: Box<dyn OverlayRenderer>,
}

impl DetectAnnotator {
    pub fn new(detector: Box<dyn SnackDetector>, renderer: Box<dyn OverlayRenderer>) -> Self {
        Self { detector, renderer }
    }
}

impl FrameAnnotator for DetectAnnotator {
    fn annotate(
        &mut self,
        frame: &Frame,
        options: &AnnotateOptions,
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        if frame.format() != PixelFormat::Rgb {
            return Err("DetectAnnotator expects RGB frames".into());
        }

        let detections = self
            .detector
            .detect(frame, options.confidence_threshold)?;
        log::debug!(
            "frame {}: {} detections above {:.2}",
            frame.index(),
            detections.len(),
            options.confidence_threshold
        );

        let mut annotated = frame.clone();
        self.renderer.render(&mut annotated, &detections, options);
        Ok(annotated)
    }
}
