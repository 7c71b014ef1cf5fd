use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use iced::widget::{button, column, container, scrollable, text};
use iced::{Element, Length, Subscription, Task};

use kinotake_core::pipeline::processor_config::{ProcessorConfig, SharedConfig};
use kinotake_core::shared::frame::{Frame, PixelFormat};

use crate::settings::{Settings, WeightsFile};
use crate::tabs;
use crate::workers::capture_worker::{self, CaptureMessage};

pub const REPOSITORY_URL: &str = "https://github.com/kinotake/kinotake-detect";

/// UI poll interval for draining the capture channel (~30 fps).
const POLL_INTERVAL: Duration = Duration::from_millis(33);

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Live,
    About,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Live, Tab::About];

    fn label(self) -> &'static str {
        match self {
            Tab::Live => "Live",
            Tab::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    SourceChanged(String),
    StartCapture,
    StopCapture,
    Poll,
    DetectionToggled(bool),
    ShowScoreToggled(bool),
    ShowCounterToggled(bool),
    ThresholdChanged(f64),
    WeightsSelected(WeightsFile),
    OpenRepository,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

struct Capture {
    rx: Receiver<CaptureMessage>,
    cancelled: Arc<AtomicBool>,
}

pub struct App {
    active_tab: Tab,
    pub settings: Settings,
    /// Shared with the capture thread's frame processor.
    config: SharedConfig,
    capture: Option<Capture>,
    /// Session-only master switch; never persisted.
    pub detection: bool,
    pub preview: Option<iced::widget::image::Handle>,
    pub status: Option<String>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let config = SharedConfig::new(ProcessorConfig {
            detection: false,
            threshold: settings.threshold,
            show_score: settings.show_score,
            show_counter: settings.show_counter,
            weights_file: settings.weights.file_name().to_string(),
        });

        (
            Self {
                active_tab: Tab::Live,
                settings,
                config,
                capture: None,
                detection: false,
                preview: None,
                status: None,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::SourceChanged(source) => {
                self.settings.source = source;
            }
            Message::StartCapture => {
                if self.capture.is_none() {
                    self.settings.save();
                    let (rx, cancelled) =
                        capture_worker::spawn(self.settings.source.clone(), self.config.clone());
                    self.capture = Some(Capture { rx, cancelled });
                    self.status = Some(format!("Opening {}...", self.settings.source));
                }
            }
            Message::StopCapture => {
                if let Some(capture) = self.capture.take() {
                    capture.cancelled.store(true, Ordering::Relaxed);
                }
                self.status = Some("Stopped".to_string());
            }
            Message::Poll => {
                let mut messages = Vec::new();
                if let Some(ref capture) = self.capture {
                    while let Ok(msg) = capture.rx.try_recv() {
                        messages.push(msg);
                    }
                }
                for msg in messages {
                    self.apply_capture_message(msg);
                }
            }
            Message::DetectionToggled(enabled) => {
                self.detection = enabled;
                self.config.set_detection(enabled);
            }
            Message::ShowScoreToggled(show) => {
                self.settings.show_score = show;
                self.settings.save();
                self.config.set_show_score(show);
            }
            Message::ShowCounterToggled(show) => {
                self.settings.show_counter = show;
                self.settings.save();
                self.config.set_show_counter(show);
            }
            Message::ThresholdChanged(threshold) => {
                self.settings.threshold = threshold;
                self.settings.save();
                self.config.set_threshold(threshold);
            }
            Message::WeightsSelected(weights) => {
                self.settings.weights = weights;
                self.settings.save();
                self.config.set_weights_file(weights.file_name());
            }
            Message::OpenRepository => {
                let _ = open::that(REPOSITORY_URL);
            }
        }
        Task::none()
    }

    fn apply_capture_message(&mut self, message: CaptureMessage) {
        match message {
            CaptureMessage::Opened(width, height) => {
                self.status = Some(format!("Live: {width}x{height}"));
            }
            CaptureMessage::Frame(frame) => {
                self.preview = Some(frame_to_handle(frame));
            }
            CaptureMessage::DownloadProgress(downloaded, total) => {
                self.status = Some(if total > 0 {
                    let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
                    format!("Downloading model... {pct}%")
                } else {
                    format!("Downloading model... {downloaded} bytes")
                });
            }
            CaptureMessage::Error(e) => {
                // The worker flips detection off in the shared config;
                // mirror that in the checkbox state.
                self.detection = false;
                self.status = Some(format!("Error: {e}"));
            }
            CaptureMessage::Stopped => {
                self.capture = None;
                self.status = Some("Stopped".to_string());
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let tab_bar = iced::widget::row(Tab::ALL
            .iter()
            .map(|&tab| {
                let btn = button(text(tab.label()).size(13))
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        let content: Element<'_, Message> = match self.active_tab {
            Tab::Live => tabs::live_tab::view(
                &self.settings,
                self.detection,
                self.capture.is_some(),
                self.preview.as_ref(),
                self.status.as_deref(),
            ),
            Tab::About => tabs::about_tab::view(),
        };

        let tab_content = container(scrollable(content).height(Length::Fill))
            .padding(16)
            .height(Length::Fill);

        column![tab_bar, tab_content]
            .spacing(0)
            .height(Length::Fill)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.capture.is_some() {
            iced::time::every(POLL_INTERVAL).map(|_| Message::Poll)
        } else {
            Subscription::none()
        }
    }
}

/// Expand a BGR transport frame into the RGBA buffer iced's image widget
/// expects.
fn frame_to_handle(frame: Frame) -> iced::widget::image::Handle {
    let (width, height) = (frame.width(), frame.height());
    let rgb = frame.into_format(PixelFormat::Rgb);

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for px in rgb.data().chunks_exact(3) {
        rgba.extend_from_slice(px);
        rgba.push(255);
    }
    iced::widget::image::Handle::from_rgba(width, height, rgba)
}
