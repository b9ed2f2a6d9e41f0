pub mod app;
pub mod assets;
pub mod event;
pub mod game;
pub mod settings;
pub mod terminal;
pub mod ui;
