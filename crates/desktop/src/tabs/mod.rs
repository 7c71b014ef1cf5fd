pub mod about_tab;
pub mod live_tab;
