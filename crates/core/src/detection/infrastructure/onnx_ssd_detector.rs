/// SSD package detector using ONNX Runtime via `ort`.
///
/// Handles square-resize preprocessing, inference, decoding of the SSD
/// detection-output layout, and per-class NMS.
use std::path::Path;

use crate::detection::domain::snack_detector::SnackDetector;
use crate::shared::detection::{Detection, SnackClass};
use crate::shared::frame::{Frame, PixelFormat};

/// Fallback SSD input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 300;

/// IoU threshold for per-class NMS.
const NMS_IOU_THRESH: f64 = 0.45;

/// Values per detection row: (image_id, class_id, score, x1, y1, x2, y2).
const ROW_LEN: usize = 7;

/// Torchvision-style normalization constants the exported model was
/// trained with.
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// SSD detector backed by an ONNX Runtime session.
pub struct OnnxSsdDetector {
    session: ort::session::Session,
    input_size: u32,
}

impl OnnxSsdDetector {
    /// Load an SSD ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting
    /// NCHW). Falls back to 300 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    // shape is [N, C, H, W] — use H (square input)
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        Ok(Self {
            session,
            input_size,
        })
    }
}

impl SnackDetector for OnnxSsdDetector {
    fn detect(
        &mut self,
        frame: &Frame,
        confidence_threshold: f64,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        if frame.format() != PixelFormat::Rgb {
            return Err("OnnxSsdDetector expects RGB frames".into());
        }

        let input_tensor = preprocess(frame, self.input_size);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("SSD model produced no outputs".into());
        }

        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape();

        // Detection-output layout: [1, 1, N, 7] or an already-squeezed
        // [1, N, 7]. The last axis is always the 7-value row.
        let valid = shape.last() == Some(&ROW_LEN)
            && shape[..shape.len() - 1].iter().all(|&d| d >= 1)
            && shape[..shape.len() - 2].iter().all(|&d| d == 1);
        if !valid {
            return Err(format!("Unexpected SSD output shape: {shape:?}").into());
        }

        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;
        let decoded = decode_rows(
            data,
            frame.width(),
            frame.height(),
            confidence_threshold,
        );

        Ok(nms_per_class(decoded, NMS_IOU_THRESH))
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Resize a frame to `target_size` x `target_size` (nearest neighbor) and
/// normalize to an NCHW float32 tensor with ImageNet mean/std.
fn preprocess(frame: &Frame, target_size: u32) -> ndarray::Array4<f32> {
    let target = target_size as usize;
    let src = frame.as_ndarray(); // [H, W, C] u8
    let src_w = frame.width() as usize;
    let src_h = frame.height() as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, target, target));
    for y in 0..target {
        let src_y = (y * src_h / target).min(src_h - 1);
        for x in 0..target {
            let src_x = (x * src_w / target).min(src_w - 1);
            for c in 0..3 {
                let v = src[[src_y, src_x, c]] as f32 / 255.0;
                tensor[[0, c, y, x]] = (v - MEAN[c]) / STD[c];
            }
        }
    }
    tensor
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode flat detection-output rows into pixel-space detections.
///
/// A row with `image_id < 0` is the padding sentinel and terminates the
/// list. Rows with the background class (0), an unknown class, or a score
/// below the threshold are dropped; boxes are clamped to the frame and
/// degenerate boxes discarded.
fn decode_rows(data: &[f32], frame_w: u32, frame_h: u32, threshold: f64) -> Vec<Detection> {
    let fw = frame_w as f64;
    let fh = frame_h as f64;

    let mut detections = Vec::new();
    for row in data.chunks_exact(ROW_LEN) {
        if row[0] < 0.0 {
            break;
        }
        let score = row[2] as f64;
        if score < threshold {
            continue;
        }
        let Some(class) = SnackClass::from_class_id(row[1] as u32) else {
            continue;
        };

        let x1 = (row[3] as f64 * fw).clamp(0.0, fw);
        let y1 = (row[4] as f64 * fh).clamp(0.0, fh);
        let x2 = (row[5] as f64 * fw).clamp(0.0, fw);
        let y2 = (row[6] as f64 * fh).clamp(0.0, fh);
        if x2 <= x1 || y2 <= y1 {
            continue;
        }

        detections.push(Detection {
            x: x1 as i32,
            y: y1 as i32,
            width: (x2 - x1) as i32,
            height: (y2 - y1) as i32,
            class,
            score,
        });
    }
    detections
}

/// Greedy per-class NMS: sort by score descending, suppress same-class boxes
/// overlapping a kept box above the threshold.
///
/// Exported detection-output layers usually run NMS themselves; this dedups
/// exports that skip it.
fn nms_per_class(mut detections: Vec<Detection>, iou_thresh: f64) -> Vec<Detection> {
    detections.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<Detection> = Vec::with_capacity(detections.len());
    for det in detections {
        let suppressed = kept
            .iter()
            .any(|k| k.class == det.class && k.iou(&det) > iou_thresh);
        if !suppressed {
            kept.push(det);
        }
    }
    kept
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
