use std::fmt;
use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Remote models the analyzer is allowed to call.
///
/// Anything outside this list is rejected at construction time with
/// [`ConfigError::UnsupportedModel`].
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::model_id::ModelId;
///
/// let m: ModelId = "gpt-4o-mini".parse().unwrap();
/// assert_eq!(m.as_str(), "gpt-4o-mini");
/// assert!("gpt-3.5-turbo".parse::<ModelId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelId {
    #[default]
    Gpt41,
    Gpt41Mini,
    CodexMiniLatest,
    Gpt4o,
    Gpt4oMini,
}

impl ModelId {
    /// Every allow-listed model, in preference order.
    pub const fn all() -> [ModelId; 5] {
        [
            ModelId::Gpt41,
            ModelId::Gpt41Mini,
            ModelId::CodexMiniLatest,
            ModelId::Gpt4o,
            ModelId::Gpt4oMini,
        ]
    }

    /// Wire identifier sent in the `model` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            ModelId::Gpt41 => "gpt-4.1",
            ModelId::Gpt41Mini => "gpt-4.1-mini",
            ModelId::CodexMiniLatest => "codex-mini-latest",
            ModelId::Gpt4o => "gpt-4o",
            ModelId::Gpt4oMini => "gpt-4o-mini",
        }
    }

    /// Human-readable description for listings.
    pub const fn description(self) -> &'static str {
        match self {
            ModelId::Gpt41 => "GPT-4.1 (most capable model, 1M context)",
            ModelId::Gpt41Mini => "GPT-4.1 Mini (fast version with high limits)",
            ModelId::CodexMiniLatest => "Codex Mini (specialized for code)",
            ModelId::Gpt4o => "GPT-4o (base model, 128K context)",
            ModelId::Gpt4oMini => "GPT-4o Mini (fast base model)",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModelId::all()
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnsupportedModel {
                model: wanted.to_string(),
                available: ModelId::all()
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_round_trips_through_from_str() {
        for m in ModelId::all() {
            assert_eq!(m.as_str().parse::<ModelId>().unwrap(), m);
        }
    }

    #[test]
    fn unknown_model_lists_allowed_ids() {
        let err = "gpt-5".parse::<ModelId>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("gpt-5"));
        assert!(msg.contains("gpt-4.1-mini"));
    }
}
