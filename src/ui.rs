#[allow(clippy::module_inception)]
mod ui;

mod api_key;
mod favorites;
mod footer;
mod header;
mod loading;
mod main_content;
mod movie_detail;
mod palette;

pub use ui::ui;
