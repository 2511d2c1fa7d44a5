//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// The agent talks to an OpenAI-compatible chat-completions service.
/// DeepSeek is the default backend; any other model identifier is carried
/// through as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// `deepseek-chat`: regular conversation, fast responses
    DeepseekChat,
    /// `deepseek-reasoner`: thinking mode, for complex multi-step planning
    DeepseekReasoner,
    /// Any other OpenAI-compatible model identifier
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::DeepseekChat => "deepseek-chat",
            Model::DeepseekReasoner => "deepseek-reasoner",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (deepseek-chat)
    fn default() -> Self {
        Model::DeepseekChat
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "deepseek-chat" => Model::DeepseekChat,
            "deepseek-reasoner" => Model::DeepseekReasoner,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(Model::Custom(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_known_models() {
        assert_eq!("deepseek-chat".parse::<Model>().unwrap(), Model::DeepseekChat);
        assert_eq!(
            "deepseek-reasoner".parse::<Model>().unwrap(),
            Model::DeepseekReasoner
        );
        assert_eq!(Model::DeepseekChat.to_string(), "deepseek-chat");
    }

    #[test]
    fn test_unknown_model_becomes_custom() {
        let model: Model = "gpt-4o-mini".parse().unwrap();
        assert_eq!(model, Model::Custom("gpt-4o-mini".to_string()));
        assert_eq!(model.as_str(), "gpt-4o-mini");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::DeepseekChat).unwrap();
        assert_eq!(json, "\"deepseek-chat\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::DeepseekChat);
    }
}
