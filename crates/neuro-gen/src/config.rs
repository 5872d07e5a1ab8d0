use std::time::Duration;

/// Model used for both content pipelines.
pub const GENERATION_MODEL: &str = "gpt-4-1106-preview";

/// Sampling profile for psychological test generation.
pub const TEST_SAMPLING: SamplingParams = SamplingParams {
    temperature: 0.7,
    max_tokens: 4000,
    top_p: 0.95,
    frequency_penalty: 0.3,
    presence_penalty: 0.3,
};

/// Sampling profile for book summaries: hotter, with stronger repetition
/// penalties so chapter summaries stay distinct.
pub const BOOK_SAMPLING: SamplingParams = SamplingParams {
    temperature: 0.8,
    max_tokens: 4000,
    top_p: 0.95,
    frequency_penalty: 0.5,
    presence_penalty: 0.5,
};

/// Fixed sampling parameters for one request kind; not tunable at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl ChatCompletionConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com".to_string(),
            model: model.into(),
            // A generation call produces up to max_tokens of output; the
            // explicit bound turns a hung request into a skipped item
            // instead of stalling the batch.
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ChatProviderConfig {
    OpenAiCompatible(ChatCompletionConfig),
}
