use std::path::PathBuf;

use crate::detection::domain::annotator_factory::AnnotatorFactory;
use crate::detection::domain::frame_annotator::FrameAnnotator;
use crate::detection::infrastructure::detect_annotator::DetectAnnotator;
use crate::detection::infrastructure::model_resolver::{self, ModelResolveError};
use crate::detection::infrastructure::onnx_ssd_detector::OnnxSsdDetector;
use crate::overlay::infrastructure::bitmap_renderer::BitmapRenderer;
use crate::shared::constants::{onnx_model_name, onnx_model_url};

/// Builds ONNX-backed annotators, resolving the model file (cache, bundled
/// directory, download) from the configured weights name.
pub struct OnnxAnnotatorFactory {
    bundled_dir: Option<PathBuf>,
    progress: Option<Box<model_resolver::ProgressFn>>,
}

impl OnnxAnnotatorFactory {
    pub fn new(bundled_dir: Option<PathBuf>) -> Self {
        Self {
            bundled_dir,
            progress: None,
        }
    }

    /// Register a download progress callback, invoked with
    /// `(bytes_downloaded, total_bytes)` while a model is being fetched.
    pub fn with_progress(mut self, progress: Box<model_resolver::ProgressFn>) -> Self {
        self.progress = Some(progress);
        self
    }
}

impl AnnotatorFactory for OnnxAnnotatorFactory {
    fn build(
        &self,
        weights_file: &str,
    ) -> Result<Box<dyn FrameAnnotator>, Box<dyn std::error::Error>> {
        let model_name = onnx_model_name(weights_file)
            .ok_or_else(|| ModelResolveError::UnknownWeights(weights_file.to_string()))?;
        let url = onnx_model_url(weights_file)
            .ok_or_else(|| ModelResolveError::UnknownWeights(weights_file.to_string()))?;

        log::info!("resolving model {model_name}");
        let model_path = model_resolver::resolve(
            &model_name,
            &url,
            self.bundled_dir.as_deref(),
            self.progress.as_deref(),
        )?;

        let detector = OnnxSsdDetector::new(&model_path)?;
        let renderer = BitmapRenderer::new();
        Ok(Box::new(DetectAnnotator::new(
            Box::new(detector),
            Box::new(renderer),
        )))
    }
}
