use crate::shared::frame::Frame;

/// Display options read fresh from the shared configuration on every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotateOptions {
    pub confidence_threshold: f64,
    pub show_score: bool,
    pub show_counter: bool,
}

/// The detector capability as the demo consumes it: one annotated image out
/// per image in.
///
/// Contract: the input frame is RGB; the output is RGB with the same
/// dimensions. Callers own any transport-encoding conversion on either side.
pub trait FrameAnnotator: Send {
    fn annotate(
        &mut self,
        frame: &Frame,
        options: &AnnotateOptions,
    ) -> Result<Frame, Box<dyn std::error::Error>>;
}
