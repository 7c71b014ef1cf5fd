use crate::detection::domain::annotator_factory::AnnotatorFactory;
use crate::detection::domain::frame_annotator::{AnnotateOptions, FrameAnnotator};
use crate::pipeline::processor_config::SharedConfig;
use crate::shared::frame::{Frame, PixelFormat};

/// Per-frame processing path shared by the live view and the batch use cases.
///
/// Snapshots the shared configuration once per frame. With detection off the
/// frame passes through byte-for-byte; with it on, the frame is converted to
/// RGB, annotated, and converted back to its transport ordering. The
/// annotator is built lazily and rebuilt when the configured weights file
/// changes, so a model is never loaded while detection stays off.
pub struct FrameProcessor {
    config: SharedConfig,
    factory: Box<dyn AnnotatorFactory>,
    annotator: Option<Box<dyn FrameAnnotator>>,
    active_weights: Option<String>,
}

impl FrameProcessor {
    pub fn new(config: SharedConfig, factory: Box<dyn AnnotatorFactory>) -> Self {
        Self {
            config,
            factory,
            annotator: None,
            active_weights: None,
        }
    }

    pub fn process(&mut self, frame: Frame) -> Result<Frame, Box<dyn std::error::Error>> {
        let config = self.config.snapshot();
        if !config.detection {
            return Ok(frame);
        }

        let options = AnnotateOptions {
            confidence_threshold: config.threshold,
            show_score: config.show_score,
            show_counter: config.show_counter,
        };

        let annotator = self.annotator_for(&config.weights_file)?;
        let transport_format = frame.format();
        let annotated = annotator.annotate(&frame.into_format(PixelFormat::Rgb), &options)?;
        Ok(annotated.into_format(transport_format))
    }

    fn annotator_for(
        &mut self,
        weights_file: &str,
    ) -> Result<&mut Box<dyn FrameAnnotator>, Box<dyn std::error::Error>> {
        if self.active_weights.as_deref() != Some(weights_file) {
            log::info!("loading annotator for {weights_file}");
            let annotator = self.factory.build(weights_file)?;
            self.annotator = Some(annotator);
            self.active_weights = Some(weights_file.to_string());
        }
        self.annotator
            .as_mut()
            .ok_or_else(|| "annotator not initialized".into())
    }
}
