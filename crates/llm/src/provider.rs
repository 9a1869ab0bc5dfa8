use snafu::Snafu;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider_id: String,
    pub api_key: String,
    pub endpoint: String,
    pub model_name: Option<String>,
}

impl ProviderConfig {
    pub fn new(
        provider_id: impl Into<String>,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model_name: Option<String>,
    ) -> Self {
        Self {
            provider_id: provider_id.into().trim().to_string(),
            api_key: api_key.into().trim().to_string(),
            endpoint: endpoint.into().trim().to_string(),
            model_name: model_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        }
    }

    pub fn model_id(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL)
    }
}

/// System prompt for a single shopping item.
pub const SHOPPING_PREAMBLE: &str = "You are a shopping assistant. The user names one item \
from their shopping list. Reply with a short purchase recommendation for that item in \
Markdown: what to look for, a sensible quantity and one money-saving tip. Keep it under \
80 words.";

pub fn item_prompt(item: &str) -> String {
    format!("Shopping list item: {item}")
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ProviderError {
    #[snafu(display("missing API key for provider '{provider_id}'"))]
    MissingApiKey {
        stage: &'static str,
        provider_id: String,
    },
    #[snafu(display("provider '{provider_id}' is not supported"))]
    UnsupportedProvider {
        stage: &'static str,
        provider_id: String,
    },
    #[snafu(display("http client failed on `{stage}`, {source}"))]
    HttpClient {
        stage: &'static str,
        source: rig::http_client::Error,
    },
    #[snafu(display("completions failed on `{stage}`, {source}"))]
    CompletionsFailed {
        stage: &'static str,
        source: rig::completion::CompletionError,
    },
    #[snafu(display("model returned no text for item '{item}'"))]
    EmptyCompletion { stage: &'static str, item: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_fields_and_defaults_model() {
        let config = ProviderConfig::new(" openai ", " sk-1 ", " ", Some("  ".to_string()));

        assert_eq!(config.provider_id, "openai");
        assert_eq!(config.api_key, "sk-1");
        assert!(config.endpoint.is_empty());
        assert_eq!(config.model_name, None);
        assert_eq!(config.model_id(), DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn explicit_model_wins() {
        let config = ProviderConfig::new("openai", "k", "", Some("gpt-4o".to_string()));
        assert_eq!(config.model_id(), "gpt-4o");
    }

    #[test]
    fn item_prompt_names_the_item() {
        assert_eq!(item_prompt("oat milk"), "Shopping list item: oat milk");
    }
}
