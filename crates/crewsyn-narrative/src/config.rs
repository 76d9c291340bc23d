use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    /// High by default: the narrative text is meant to vary run to run.
    pub temperature: f64,
    pub max_tokens: u32,
}

impl OpenAiCompatibleConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com".to_string(),
            model: model.into(),
            timeout: Duration::from_secs(15),
            temperature: 0.95,
            max_tokens: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NarrativeProviderConfig {
    OpenAiCompatible(OpenAiCompatibleConfig),
}
