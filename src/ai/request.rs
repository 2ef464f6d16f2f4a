use super::prompts;
use crate::core::descriptor::PromptSource;
use crate::error::PromptError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completion request body built from a prompt. Rendering only; sending
/// it is left to whoever owns the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn from_source<S: PromptSource + ?Sized>(
        source: &S,
        model: &str,
    ) -> Result<Self, PromptError> {
        let user = render_user_message(source).ok_or(PromptError::EmptyPrompt)?;
        let system = prompts::system_prompt_for(source.prompt_kind()).trim();

        Ok(Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
        })
    }
}

/// Context first, then the prompt, separated by a blank line. Blank parts are
/// skipped; `None` when nothing is left.
pub fn render_user_message<S: PromptSource + ?Sized>(source: &S) -> Option<String> {
    let parts: Vec<&str> = [source.context_text(), source.prompt_text()]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .map(str::trim_end)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}
