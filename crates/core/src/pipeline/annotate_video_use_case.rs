use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::pipeline::frame_processor::FrameProcessor;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Batch video pipeline: read → process → write, frame by frame.
///
/// Reports progress after every written frame; the callback returning false
/// or the cancel flag going high aborts the run. Reader and writer are
/// closed on every exit path.
pub struct AnnotateVideoUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    processor: FrameProcessor,
    on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
    cancelled: Arc<AtomicBool>,
}

impl AnnotateVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        processor: FrameProcessor,
        on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            reader,
            writer,
            processor,
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let metadata = self.reader.open(input_path)?;
        self.writer.open(output_path, &metadata)?;

        let result = self.run(metadata.total_frames);

        self.reader.close();
        let close_result = self.writer.close();
        result?;
        close_result
    }

    fn run(&mut self, total_frames: usize) -> Result<(), Box<dyn std::error::Error>> {
        let mut written = 0usize;
        let mut frames = self.reader.frames();
        while let Some(frame) = frames.next() {
            if self.cancelled.load(Ordering::Relaxed) {
                log::info!("annotation cancelled after {written} frames");
                return Ok(());
            }

            let processed = self.processor.process(frame?)?;
            self.writer.write(&processed)?;
            written += 1;

            if let Some(ref cb) = self.on_progress {
                if !cb(written, total_frames) {
                    return Err("annotation aborted by progress callback".into());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::annotator_factory::AnnotatorFactory;
    use crate::detection::domain::frame_annotator::{AnnotateOptions, FrameAnnotator};
    use crate::pipeline::processor_config::{ProcessorConfig, SharedConfig};
    use crate::shared::frame::{Frame, PixelFormat};
    use crate::shared::video_metadata::VideoMetadata;
    use std::sync::Mutex;

    // --- Stubs ---

    struct StubReader {
        frames: Vec<Frame>,
        closed: Arc<Mutex<bool>>,
    }

    impl StubReader {
        fn new(frames: Vec<Frame>) -> Self {
            Self {
                frames,
                closed: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl VideoReader for StubReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            Ok(VideoMetadata {
                width: 8,
                height: 8,
                fps: 30.0,
                total_frames: self.frames.len(),
                codec: String::new(),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frames.drain(..).map(Ok))
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() = true;
        }
    }

    struct StubWriter {
        written: Arc<Mutex<Vec<Frame>>>,
        closed: Arc<Mutex<bool>>,
    }

    impl StubWriter {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
                closed: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl VideoWriter for StubWriter {
        fn open(
            &mut self,
            _path: &Path,
            _metadata: &VideoMetadata,
        ) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written.lock().unwrap().push(frame.clone());
            Ok(())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
    }

    struct EchoAnnotator;

    impl FrameAnnotator for EchoAnnotator {
        fn annotate(
            &mut self,
            frame: &Frame,
            _options: &AnnotateOptions,
        ) -> Result<Frame, Box<dyn std::error::Error>> {
            Ok(frame.clone())
        }
    }

    struct EchoFactory;

    impl AnnotatorFactory for EchoFactory {
        fn build(
            &self,
            _weights_file: &str,
        ) -> Result<Box<dyn FrameAnnotator>, Box<dyn std::error::Error>> {
            Ok(Box::new(EchoAnnotator))
        }
    }

    // --- Helpers ---

    fn make_frames(count: usize) -> Vec<Frame> {
        (0..count)
            .map(|i| Frame::new(vec![128; 8 * 8 * 3], 8, 8, PixelFormat::Bgr, i))
            .collect()
    }

    fn processor(detection: bool) -> FrameProcessor {
        let config = SharedConfig::new(ProcessorConfig {
            detection,
            ..ProcessorConfig::default()
        });
        FrameProcessor::new(config, Box::new(EchoFactory))
    }

    // --- Tests ---

    #[test]
    fn test_processes_all_frames() {
        let writer = StubWriter::new();
        let written = writer.written.clone();

        let mut uc = AnnotateVideoUseCase::new(
            Box::new(StubReader::new(make_frames(5))),
            Box::new(writer),
            processor(true),
            None,
            None,
        );

        uc.execute(Path::new("in.mp4"), Path::new("/tmp/out.mp4"))
            .unwrap();
        assert_eq!(written.lock().unwrap().len(), 5);
    }

    #[test]
    fn test_frames_written_in_order() {
        let writer = StubWriter::new();
        let written = writer.written.clone();

        let mut uc = AnnotateVideoUseCase::new(
            Box::new(StubReader::new(make_frames(10))),
            Box::new(writer),
            processor(false),
            None,
            None,
        );

        uc.execute(Path::new("in.mp4"), Path::new("/tmp/out.mp4"))
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 10);
        for (i, frame) in written.iter().enumerate() {
            assert_eq!(frame.index(), i);
        }
    }

    #[test]
    fn test_empty_video() {
        let writer = StubWriter::new();
        let written = writer.written.clone();

        let mut uc = AnnotateVideoUseCase::new(
            Box::new(StubReader::new(vec![])),
            Box::new(writer),
            processor(true),
            None,
            None,
        );

        uc.execute(Path::new("in.mp4"), Path::new("/tmp/out.mp4"))
            .unwrap();
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_closes_reader_and_writer() {
        let reader = StubReader::new(make_frames(2));
        let reader_closed = reader.closed.clone();
        let writer = StubWriter::new();
        let writer_closed = writer.closed.clone();

        let mut uc = AnnotateVideoUseCase::new(
            Box::new(reader),
            Box::new(writer),
            processor(true),
            None,
            None,
        );

        uc.execute(Path::new("in.mp4"), Path::new("/tmp/out.mp4"))
            .unwrap();

        assert!(*reader_closed.lock().unwrap());
        assert!(*writer_closed.lock().unwrap());
    }

    #[test]
    fn test_progress_reported_per_frame() {
        let progress_calls = Arc::new(Mutex::new(Vec::new()));
        let progress_clone = progress_calls.clone();

        let mut uc = AnnotateVideoUseCase::new(
            Box::new(StubReader::new(make_frames(4))),
            Box::new(StubWriter::new()),
            processor(true),
            Some(Box::new(move |current, total| {
                progress_clone.lock().unwrap().push((current, total));
                true
            })),
            None,
        );

        uc.execute(Path::new("in.mp4"), Path::new("/tmp/out.mp4"))
            .unwrap();

        let calls = progress_calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn test_cancel_via_on_progress() {
        let mut uc = AnnotateVideoUseCase::new(
            Box::new(StubReader::new(make_frames(10))),
            Box::new(StubWriter::new()),
            processor(true),
            Some(Box::new(|current, _total| current < 3)),
            None,
        );

        let result = uc.execute(Path::new("in.mp4"), Path::new("/tmp/out.mp4"));
        assert!(result.is_err());
    }

    #[test]
    fn test_cancellation_via_atomic_bool() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let cancelled_clone = cancelled.clone();

        let writer = StubWriter::new();
        let written = writer.written.clone();
        let writer_closed = writer.closed.clone();

        let mut uc = AnnotateVideoUseCase::new(
            Box::new(StubReader::new(make_frames(10))),
            Box::new(writer),
            processor(true),
            Some(Box::new(move |current, _total| {
                if current >= 3 {
                    cancelled_clone.store(true, Ordering::Relaxed);
                }
                true
            })),
            Some(cancelled),
        );

        uc.execute(Path::new("in.mp4"), Path::new("/tmp/out.mp4"))
            .unwrap();

        assert!(written.lock().unwrap().len() < 10);
        assert!(*writer_closed.lock().unwrap());
    }
}
