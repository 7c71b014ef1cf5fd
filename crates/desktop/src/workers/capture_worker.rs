use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use kinotake_core::detection::infrastructure::onnx_annotator_factory::OnnxAnnotatorFactory;
use kinotake_core::pipeline::frame_processor::FrameProcessor;
use kinotake_core::pipeline::processor_config::SharedConfig;
use kinotake_core::shared::frame::Frame;
use kinotake_core::video::domain::video_reader::VideoReader;
use kinotake_core::video::infrastructure::ffmpeg_reader::FfmpegReader;

/// Messages sent from the capture thread to the UI.
#[derive(Debug, Clone)]
pub enum CaptureMessage {
    /// Source opened with the given dimensions.
    Opened(u32, u32),
    /// A processed frame, ready to display (BGR transport ordering).
    Frame(Frame),
    /// Model download progress: `(bytes_downloaded, total_bytes)`.
    DownloadProgress(u64, u64),
    Error(String),
    Stopped,
}

/// Spawn a background capture worker for the given source.
///
/// Returns the channel receiver and cancellation token. The worker owns the
/// reader and the frame processor; the UI only flips the shared config and
/// drains the channel.
pub fn spawn(source: String, config: SharedConfig) -> (Receiver<CaptureMessage>, Arc<AtomicBool>) {
    let (tx, rx) = crossbeam_channel::unbounded::<CaptureMessage>();
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancelled_clone = cancelled.clone();

    thread::spawn(move || {
        if let Err(e) = run_capture(&tx, &cancelled_clone, &source, config) {
            if !cancelled_clone.load(Ordering::Relaxed) {
                let _ = tx.send(CaptureMessage::Error(e.to_string()));
            }
        }
        let _ = tx.send(CaptureMessage::Stopped);
    });

    (rx, cancelled)
}

fn run_capture(
    tx: &Sender<CaptureMessage>,
    cancelled: &Arc<AtomicBool>,
    source: &str,
    config: SharedConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let tx_dl = tx.clone();
    let factory = Box::new(OnnxAnnotatorFactory::new(None).with_progress(Box::new(
        move |downloaded, total| {
            let _ = tx_dl.send(CaptureMessage::DownloadProgress(downloaded, total));
        },
    )));
    let config_handle = config.clone();
    let mut processor = FrameProcessor::new(config, factory);

    let mut reader = FfmpegReader::new();
    let metadata = reader.open(Path::new(source))?;
    let _ = tx.send(CaptureMessage::Opened(metadata.width, metadata.height));
    log::info!(
        "capture opened: {} ({}x{} @ {:.1} fps)",
        source,
        metadata.width,
        metadata.height,
        metadata.fps
    );

    for frame in reader.frames() {
        if cancelled.load(Ordering::Relaxed) {
            break;
        }

        let frame = frame?;
        // A processing failure (e.g. model download refused) must not kill
        // the stream: report it, switch detection back off, and show the
        // raw frame instead.
        let display = match processor.process(frame.clone()) {
            Ok(processed) => processed,
            Err(e) => {
                log::warn!("frame processing failed: {e}");
                let _ = tx.send(CaptureMessage::Error(e.to_string()));
                config_handle.set_detection(false);
                frame
            }
        };
        let _ = tx.send(CaptureMessage::Frame(display));
    }

    Ok(())
}
