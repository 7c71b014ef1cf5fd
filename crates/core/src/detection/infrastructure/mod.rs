pub mod detect_annotator;
pub mod model_resolver;
pub mod onnx_annotator_factory;
pub mod onnx_ssd_detector;
