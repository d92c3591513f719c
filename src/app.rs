#[allow(clippy::module_inception)]
mod app;
pub mod config;
pub mod detail;
pub mod error;
pub mod favorites;
pub mod filters;
pub mod listing;
pub mod models;
pub mod store;
pub mod theme;
pub mod tmdb;
pub mod worker;

pub use app::{App, CurrentScreen, InputMode};
