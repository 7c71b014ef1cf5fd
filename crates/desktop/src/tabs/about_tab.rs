use iced::widget::{button, column, text, Space};
use iced::Element;

use crate::app::Message;

pub fn view() -> Element<'static, Message> {
    let version = env!("CARGO_PKG_VERSION");

    column![
        text("Kinotake Detector").size(22),
        Space::new().height(4),
        text(format!("Version {version}")).size(13),
        Space::new().height(12),
        text(
            "Points a camera at a pile of chocolate snacks and tells \
             Kinoko no Yama and Takenoko no Sato apart in real time, \
             using an SSD detector trained on packaged-snack photos."
        )
        .size(13),
        Space::new().height(16),
        button(text("Source code").size(13))
            .on_press(Message::OpenRepository)
            .padding([8, 16]),
    ]
    .spacing(0)
    .into()
}
