// Library interface for hearth (shared by the binary and integration tests)
pub mod app;
pub mod composer;
pub mod feed;
pub mod fixtures;

#[macro_use]
pub mod logging;

pub mod settings;
pub mod terminal;
pub mod ui;
