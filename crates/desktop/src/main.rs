mod app;
mod settings;
mod tabs;
mod workers;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(App::new, App::update, App::view)
        .title("Kinotake Detector")
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(820.0, 640.0),
            ..Default::default()
        })
        .run()
}
