use crate::error::PromptError;
use std::env::VarError;
use std::path::PathBuf;

pub const STATE_ENV: &str = "PROMPT_KIT_STATE";
pub const MODEL_ENV: &str = "PROMPT_KIT_MODEL";

const DEFAULT_STATE_FILE: &str = "prompt_state.json";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub state_path: PathBuf,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, PromptError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, PromptError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let state_path = read_var(&lookup, STATE_ENV)?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
        let model = read_var(&lookup, MODEL_ENV)?.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self { state_path, model })
    }

    pub fn with_state_override(mut self, state: Option<PathBuf>) -> Self {
        if let Some(path) = state {
            self.state_path = path;
        }
        self
    }
}

// Unset means default; set-but-blank or non-unicode is a mistake worth reporting.
fn read_var<F>(lookup: &F, key: &str) -> Result<Option<String>, PromptError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(value) if value.trim().is_empty() => {
            Err(PromptError::ConfigError(format!("{key} is set but empty")))
        }
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => {
            Err(PromptError::ConfigError(format!("{key} is not valid unicode")))
        }
    }
}
