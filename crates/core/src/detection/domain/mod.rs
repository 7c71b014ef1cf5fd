pub mod annotator_factory;
pub mod frame_annotator;
pub mod snack_detector;
