use super::descriptor::PromptDescriptor;
use crate::error::PromptError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Highest envelope and snapshot version this build writes and reads.
pub const ENVELOPE_VERSION: u32 = 1;

/// Wire form of a [`PromptDescriptor`]. Field names are fixed; the camelCase
/// aliases are the names older plugin state was persisted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Versioned JSON form of a prompt descriptor.")]
pub struct Envelope {
    #[serde(default)]
    #[schemars(description = "Format version. A missing value marks a legacy payload (0).")]
    pub version: u32,

    #[serde(default, alias = "necessaryContextString", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Supplementary text, e.g. a code snippet, placed before the prompt.")]
    pub context_text: Option<String>,

    #[serde(default, alias = "prompt", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "The instruction sent to the assistant.")]
    pub prompt_text: Option<String>,

    #[serde(default, alias = "promptType", skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Free-form label of the prompt template, e.g. 'explain'.")]
    pub prompt_kind: Option<String>,
}

impl From<PromptDescriptor> for Envelope {
    fn from(descriptor: PromptDescriptor) -> Self {
        let (context_text, prompt_text, prompt_kind) = descriptor.into_parts();
        Self {
            version: ENVELOPE_VERSION,
            context_text,
            prompt_text,
            prompt_kind,
        }
    }
}

impl From<Envelope> for PromptDescriptor {
    fn from(envelope: Envelope) -> Self {
        PromptDescriptor::new(envelope.context_text, envelope.prompt_text, envelope.prompt_kind)
    }
}

pub fn check_version(found: u32) -> Result<(), PromptError> {
    if found > ENVELOPE_VERSION {
        return Err(PromptError::UnsupportedVersion {
            found,
            supported: ENVELOPE_VERSION,
        });
    }
    Ok(())
}

pub fn encode(descriptor: &PromptDescriptor) -> Result<String, PromptError> {
    Ok(serde_json::to_string(&Envelope::from(descriptor.clone()))?)
}

pub fn encode_pretty(descriptor: &PromptDescriptor) -> Result<String, PromptError> {
    Ok(serde_json::to_string_pretty(&Envelope::from(descriptor.clone()))?)
}

pub fn decode(input: &str) -> Result<PromptDescriptor, PromptError> {
    let envelope: Envelope = serde_json::from_str(input)?;
    check_version(envelope.version)?;
    if envelope.version == 0 {
        log::debug!("Decoded legacy prompt payload without a version field");
    }
    let descriptor = PromptDescriptor::from(envelope);
    if descriptor.is_empty() {
        log::warn!("Decoded a prompt with no context, text or kind");
    }
    Ok(descriptor)
}
