pub mod app;
pub mod input;
pub mod keymap;
pub mod render;
pub mod theme;
pub mod undo;

pub use app::{App, AppEvent, Effect, run, update};
