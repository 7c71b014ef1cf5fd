use std::path::Path;

use crate::pipeline::frame_processor::FrameProcessor;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

/// Single-image pipeline: read → process → write.
pub struct AnnotateImageUseCase {
    reader: Box<dyn VideoReader>,
    image_writer: Box<dyn ImageWriter>,
    processor: FrameProcessor,
}

impl AnnotateImageUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        image_writer: Box<dyn ImageWriter>,
        processor: FrameProcessor,
    ) -> Self {
        Self {
            reader,
            image_writer,
            processor,
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let _metadata = self.reader.open(input_path)?;

        let frame = self.reader.frames().next().ok_or("No frames in image")??;
        self.reader.close();

        let processed = self.processor.process(frame)?;
        self.image_writer.write(output_path, &processed)?;

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
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubImageReader {
        frame: Option<Frame>,
    }

    impl VideoReader for StubImageReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            let frame = self.frame.as_ref().ok_or("no frame")?;
            Ok(VideoMetadata {
                width: frame.width(),
                height: frame.height(),
                fps: 0.0,
                total_frames: 1,
                codec: String::new(),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frame.take().into_iter().map(Ok))
        }

        fn close(&mut self) {
            self.frame = None;
        }
    }

    struct StubImageWriter {
        written: Arc<Mutex<Vec<(std::path::PathBuf, Frame)>>>,
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
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

    fn make_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![128; (w * h * 3) as usize], w, h, PixelFormat::Bgr, 0)
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
    fn test_writes_processed_image_to_output_path() {
        let writer = StubImageWriter {
            written: Arc::new(Mutex::new(Vec::new())),
        };
        let written = writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageReader {
                frame: Some(make_frame(100, 50)),
            }),
            Box::new(writer),
            processor(true),
        );

        uc.execute(Path::new("in.png"), Path::new("out.png"))
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, Path::new("out.png"));
        assert_eq!(written[0].1.width(), 100);
        assert_eq!(written[0].1.height(), 50);
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageReader { frame: None }),
            Box::new(StubImageWriter {
                written: Arc::new(Mutex::new(Vec::new())),
            }),
            processor(true),
        );

        assert!(uc.execute(Path::new("in.png"), Path::new("out.png")).is_err());
    }

    #[test]
    fn test_detection_off_writes_input_unchanged() {
        let writer = StubImageWriter {
            written: Arc::new(Mutex::new(Vec::new())),
        };
        let written = writer.written.clone();

        let mut uc = AnnotateImageUseCase::new(
            Box::new(StubImageReader {
                frame: Some(make_frame(10, 10)),
            }),
            Box::new(writer),
            processor(false),
        );

        uc.execute(Path::new("in.png"), Path::new("out.png"))
            .unwrap();

        let written = written.lock().unwrap();
        assert!(written[0].1.data().iter().all(|&b| b == 128));
    }
}
