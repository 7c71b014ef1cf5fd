use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use kinotake_core::detection::infrastructure::onnx_annotator_factory::OnnxAnnotatorFactory;
use kinotake_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use kinotake_core::pipeline::annotate_video_use_case::AnnotateVideoUseCase;
use kinotake_core::pipeline::frame_processor::FrameProcessor;
use kinotake_core::pipeline::processor_config::{ProcessorConfig, SharedConfig};
use kinotake_core::shared::constants::{
    DEFAULT_WEIGHTS_FILE, IMAGE_EXTENSIONS, WEIGHTS_FILES,
};
use kinotake_core::video::domain::image_writer::ImageWriter;
use kinotake_core::video::domain::video_reader::VideoReader;
use kinotake_core::video::domain::video_writer::VideoWriter;
use kinotake_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use kinotake_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use kinotake_core::video::infrastructure::image_file_reader::ImageFileReader;
use kinotake_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Kinoko/Takenoko package detection for videos and images.
#[derive(Parser)]
#[command(name = "kinotake")]
struct Cli {
    /// Input video or image file.
    input: PathBuf,

    /// Output file.
    output: PathBuf,

    /// Detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.6")]
    confidence: f64,

    /// Draw the confidence score next to each label.
    #[arg(long)]
    show_score: bool,

    /// Hide the per-class counter banner.
    #[arg(long)]
    no_counter: bool,

    /// Weights file to use (kinotake_ssd_v1.pth, v2, or v3).
    #[arg(long, default_value = DEFAULT_WEIGHTS_FILE)]
    weights: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = SharedConfig::new(ProcessorConfig {
        detection: true,
        threshold: cli.confidence,
        show_score: cli.show_score,
        show_counter: !cli.no_counter,
        weights_file: cli.weights.clone(),
    });

    let factory =
        Box::new(OnnxAnnotatorFactory::new(None).with_progress(Box::new(download_progress)));
    let processor = FrameProcessor::new(config, factory);

    if is_image(&cli.input) {
        run_image(&cli.input, &cli.output, processor)?;
    } else {
        run_video(&cli.input, &cli.output, processor)?;
    }

    Ok(())
}

fn run_image(
    input: &Path,
    output: &Path,
    processor: FrameProcessor,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn VideoReader> = Box::new(ImageFileReader::new());
    let image_writer: Box<dyn ImageWriter> = Box::new(ImageFileWriter::new());

    let mut use_case = AnnotateImageUseCase::new(reader, image_writer, processor);
    use_case.execute(input, output)?;
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_video(
    input: &Path,
    output: &Path,
    processor: FrameProcessor,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn VideoReader> = Box::new(FfmpegReader::new());
    let writer: Box<dyn VideoWriter> = Box::new(FfmpegWriter::new());

    let progress: Box<dyn Fn(usize, usize) -> bool + Send> = Box::new(|current, total| {
        if total > 0 {
            eprint!("\rProcessing frame {current}/{total}");
        } else {
            eprint!("\rProcessing frame {current}");
        }
        true
    });

    let mut use_case = AnnotateVideoUseCase::new(reader, writer, processor, Some(progress), None);
    use_case.execute(input, output)?;
    eprintln!();
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if !WEIGHTS_FILES.contains(&cli.weights.as_str()) {
        return Err(format!(
            "Weights must be one of: {}, got '{}'",
            WEIGHTS_FILES.join(", "),
            cli.weights
        )
        .into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading detection model... {pct}%");
    } else {
        eprint!("\rDownloading detection model... {downloaded} bytes");
    }
}
