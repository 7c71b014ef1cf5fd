use iced::widget::{
    button, checkbox, column, container, pick_list, row, slider, text, text_input, Space,
};
use iced::{Element, Length};

use kinotake_core::shared::constants::THRESHOLD_STEP;

use crate::app::Message;
use crate::settings::{Settings, WeightsFile};

pub fn view<'a>(
    settings: &Settings,
    detection: bool,
    running: bool,
    preview: Option<&'a iced::widget::image::Handle>,
    status: Option<&str>,
) -> Element<'a, Message> {
    let source_row = row![
        text("Source").size(13),
        text_input("camera device or video file", &settings.source)
            .on_input(Message::SourceChanged)
            .size(13)
            .width(Length::Fill),
        if running {
            button(text("Stop").size(13))
                .on_press(Message::StopCapture)
                .padding([6, 16])
                .style(button::danger)
        } else {
            button(text("Start").size(13))
                .on_press(Message::StartCapture)
                .padding([6, 16])
        },
    ]
    .spacing(12)
    .align_y(iced::Alignment::Center);

    let preview_area: Element<'a, Message> = match preview {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(420.0))
            .into(),
        None => container(text("No video").size(13))
            .width(Length::Fill)
            .height(Length::Fixed(420.0))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(420.0))
            .into(),
    };

    let controls = column![
        checkbox(detection)
            .label("DETECTION")
            .on_toggle(Message::DetectionToggled)
            .text_size(13),
        Space::new().height(8),
        checkbox(settings.show_score)
            .label("Show score")
            .on_toggle(Message::ShowScoreToggled)
            .text_size(13),
        Space::new().height(8),
        checkbox(settings.show_counter)
            .label("Show counter")
            .on_toggle(Message::ShowCounterToggled)
            .text_size(13),
        Space::new().height(12),
        row![
            text("Threshold").size(13),
            slider(0.0..=1.0, settings.threshold, Message::ThresholdChanged).step(THRESHOLD_STEP),
            text(format!("{:.2}", settings.threshold)).size(13),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(12),
        row![
            text("Weights").size(13),
            pick_list(WeightsFile::ALL, Some(settings.weights), |w| {
                Message::WeightsSelected(w)
            })
            .text_size(13),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
    ]
    .spacing(0);

    let status_line = text(status.unwrap_or("").to_string()).size(13);

    column![
        source_row,
        Space::new().height(12),
        preview_area,
        Space::new().height(12),
        controls,
        Space::new().height(8),
        status_line,
    ]
    .spacing(0)
    .into()
}
