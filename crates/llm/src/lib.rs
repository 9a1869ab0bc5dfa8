use std::sync::Arc;

use smartshop_core::{AiStateHandle, SubmissionService};

mod provider;
mod rig_adapter;

pub use provider::{
    DEFAULT_OPENAI_MODEL, ProviderConfig, ProviderError, ProviderResult, SHOPPING_PREAMBLE,
    item_prompt,
};
pub use rig_adapter::{RIG_OPENAI_PROVIDER_ID, RigShoppingAssistant};

pub fn create_service(
    mut config: ProviderConfig,
    ai_state: AiStateHandle,
) -> ProviderResult<Arc<dyn SubmissionService>> {
    if config.provider_id.trim().is_empty() {
        config.provider_id = RIG_OPENAI_PROVIDER_ID.to_string();
    }

    match config.provider_id.as_str() {
        "openai" | "rig-openai" => {
            config.provider_id = RIG_OPENAI_PROVIDER_ID.to_string();
            Ok(Arc::new(RigShoppingAssistant::new(config, ai_state)?))
        }
        _ => Err(ProviderError::UnsupportedProvider {
            stage: "create-service",
            provider_id: config.provider_id,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_provider_defaults_to_openai() {
        let config = ProviderConfig::new("", "sk-test", "", None);
        assert!(create_service(config, AiStateHandle::default()).is_ok());
    }

    #[test]
    fn unknown_provider_is_unsupported() {
        let config = ProviderConfig::new("anthropic", "sk-test", "", None);
        let result = create_service(config, AiStateHandle::default());
        assert!(matches!(
            result,
            Err(ProviderError::UnsupportedProvider { provider_id, .. }) if provider_id == "anthropic"
        ));
    }

    #[test]
    fn missing_key_surfaces_before_any_request() {
        let config = ProviderConfig::new("openai", "", "", None);
        assert!(matches!(
            create_service(config, AiStateHandle::default()),
            Err(ProviderError::MissingApiKey { .. })
        ));
    }
}
