use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("JSON Error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unsupported format version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Empty Prompt: neither context nor prompt text is set")]
    EmptyPrompt,

    #[error("Config Error: {0}")]
    ConfigError(String),
}
