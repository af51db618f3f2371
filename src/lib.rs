pub mod app;
pub mod audio;
pub mod config;
pub mod gui;
pub mod util;
