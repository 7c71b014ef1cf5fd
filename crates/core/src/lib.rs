//! Core library for the kinoko/takenoko package detection demo.
//!
//! Layout follows a domain/infrastructure split: `detection` holds the
//! detector contracts and the ONNX implementation, `overlay` renders
//! boxes and labels onto frames, `pipeline` owns the per-frame callback
//! and the offline use cases, and `video` is the frame transport.

pub mod detection;
pub mod overlay;
pub mod pipeline;
pub mod shared;
pub mod video;
