//! Intake dialogue configuration
//!
//! Controls when full-transcript extraction is attempted and the sampling
//! parameters of the two kinds of model call.

use serde::Deserialize;

use super::error::ValidationError;

/// Sampling parameters for one kind of model call
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GenerationProfile {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationProfile {
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }

    fn validate(&self, label: &'static str) -> Result<(), ValidationError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature(label));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidTokenBudget(label));
        }
        Ok(())
    }
}

/// Intake dialogue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Patient turns required before the first extraction attempt
    #[serde(default = "default_threshold")]
    pub extraction_turn_threshold: u32,

    /// Turns between extraction attempts once past the threshold (1 = every turn)
    #[serde(default = "default_interval")]
    pub extraction_interval: u32,

    /// Sampling for conversational replies
    #[serde(default = "default_conversation")]
    pub conversation: GenerationProfile,

    /// Sampling for record extraction
    #[serde(default = "default_extraction")]
    pub extraction: GenerationProfile,
}

impl IntakeConfig {
    /// Whether extraction should be attempted after `turns_counted` utterances
    pub fn should_attempt_extraction(&self, turns_counted: u32) -> bool {
        if turns_counted < self.extraction_turn_threshold {
            return false;
        }
        let interval = self.extraction_interval.max(1);
        (turns_counted - self.extraction_turn_threshold) % interval == 0
    }

    /// Validate intake configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.extraction_turn_threshold == 0 {
            return Err(ValidationError::InvalidExtractionThreshold);
        }
        if self.extraction_interval == 0 {
            return Err(ValidationError::InvalidExtractionInterval);
        }
        self.conversation.validate("conversation")?;
        self.extraction.validate("extraction")?;
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            extraction_turn_threshold: default_threshold(),
            extraction_interval: default_interval(),
            conversation: default_conversation(),
            extraction: default_extraction(),
        }
    }
}

fn default_threshold() -> u32 {
    10
}

fn default_interval() -> u32 {
    1
}

fn default_conversation() -> GenerationProfile {
    GenerationProfile::new(0.6, 120)
}

fn default_extraction() -> GenerationProfile {
    GenerationProfile::new(0.05, 700)
}
