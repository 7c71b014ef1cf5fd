/// Released model weights, oldest to newest. The names mirror the training
/// checkpoints; the downloadable artifacts are their ONNX exports.
pub const WEIGHTS_FILES: &[&str] = &[
    "kinotake_ssd_v1.pth",
    "kinotake_ssd_v2.pth",
    "kinotake_ssd_v3.pth",
];

pub const DEFAULT_WEIGHTS_FILE: &str = "kinotake_ssd_v3.pth";

pub const MODEL_BASE_URL: &str =
    "https://github.com/kinotake/kinotake-detect/releases/download/v0.2.0";

/// Default detection confidence threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Slider granularity for the threshold control.
pub const THRESHOLD_STEP: f64 = 0.05;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// ONNX artifact name for a weights file, or `None` if the name is not one
/// of the released weights.
pub fn onnx_model_name(weights_file: &str) -> Option<String> {
    if !WEIGHTS_FILES.contains(&weights_file) {
        return None;
    }
    Some(format!(
        "{}.onnx",
        weights_file.strip_suffix(".pth").unwrap_or(weights_file)
    ))
}

/// Download URL for a weights file's ONNX artifact.
pub fn onnx_model_url(weights_file: &str) -> Option<String> {
    onnx_model_name(weights_file).map(|name| format!("{MODEL_BASE_URL}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_is_third_entry() {
        assert_eq!(WEIGHTS_FILES[2], DEFAULT_WEIGHTS_FILE);
    }

    #[test]
    fn test_onnx_model_name_for_known_weights() {
        assert_eq!(
            onnx_model_name("kinotake_ssd_v3.pth").as_deref(),
            Some("kinotake_ssd_v3.onnx")
        );
    }

    #[test]
    fn test_onnx_model_name_rejects_unknown_weights() {
        assert_eq!(onnx_model_name("resnet50.pth"), None);
        assert_eq!(onnx_model_name(""), None);
    }

    #[test]
    fn test_onnx_model_url() {
        let url = onnx_model_url("kinotake_ssd_v1.pth").unwrap();
        assert!(url.starts_with("https://"));
        assert!(url.ends_with("/kinotake_ssd_v1.onnx"));
    }
}
