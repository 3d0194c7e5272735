//! UI module - terminal rendering and interactive prompting

pub mod prompt;
pub mod render;
pub mod state;

pub use render::{banner, render_outcome, Banner, RenderOptions};
pub use state::{LogEntry, SessionLog};
