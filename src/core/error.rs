use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Could not decode {source_name}: {reason}")]
    FileDecode { source_name: String, reason: String },

    #[error("Invalid intent table: {0}")]
    InvalidIntentTable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Chart export error: {0}")]
    ImageError(#[from] image::ImageError),
}

impl AssistantError {
    pub fn decode(source_name: &str, reason: impl Into<String>) -> Self {
        Self::FileDecode {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
