use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct LocalMindConfigTOML {
    pub config: LocalMindConfigInner,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LocalMindConfigInner {
    pub discord: DiscordConfig,
    pub llm: LlmConfig,
    pub context: ContextConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DiscordConfig {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: Option<u64>,
    pub temperature: Option<f64>,
    /// request timeout in seconds
    pub timeout: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1234/v1".to_string(),
            api_key: "lm-studio".to_string(),
            model: "local-model".to_string(),
            max_tokens: None,
            temperature: None,
            timeout: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ContextConfig {
    /// window bound, counting the system directive
    pub max_messages: usize,
    pub system_prompt: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_messages: 20,
            system_prompt: "You are a helpful and friendly AI assistant. You have memory of our \
                            conversation, so you can reference previous messages and provide \
                            contextual responses. Always be polite and clear."
                .to_string(),
        }
    }
}
