pub mod config;
pub mod error;

pub use config::{config, AssistantConfig};
pub use error::{AssistantError, Result};
