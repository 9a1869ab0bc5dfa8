use futures::StreamExt;
use futures::future::try_join_all;
use rig::completion::{CompletionModel, Message as RigMessage};
use rig::prelude::CompletionClient;
use rig::providers::openai;
use rig::streaming::StreamedAssistantContent;
use snafu::{ResultExt, ensure};

use smartshop_core::{
    AiStateHandle, BoxFuture, ChatError, ChatResult, Message, MessageId, NewConversation,
    ResultCode, SubmissionService, SubmitOutcome, split_items,
};

use super::provider::{
    CompletionsFailedSnafu, EmptyCompletionSnafu, HttpClientSnafu, MissingApiKeySnafu,
    ProviderConfig, ProviderError, ProviderResult, SHOPPING_PREAMBLE, item_prompt,
};

pub const RIG_OPENAI_PROVIDER_ID: &str = "openai";

type RigStreamingResponse = rig::streaming::StreamingCompletionResponse<
    rig::providers::openai::responses_api::streaming::StreamingCompletionResponse,
>;

/// Submission service that asks an OpenAI-compatible model for one
/// recommendation per shopping item.
pub struct RigShoppingAssistant {
    config: ProviderConfig,
    ai_state: AiStateHandle,
}

impl RigShoppingAssistant {
    pub fn new(config: ProviderConfig, ai_state: AiStateHandle) -> ProviderResult<Self> {
        ensure!(
            !config.api_key.is_empty(),
            MissingApiKeySnafu {
                stage: "rig-assistant-new",
                provider_id: config.provider_id.clone(),
            }
        );

        Ok(Self { config, ai_state })
    }

    fn build_client(config: &ProviderConfig) -> ProviderResult<openai::Client> {
        let mut builder = openai::Client::builder().api_key(config.api_key.as_str());
        if !config.endpoint.is_empty() {
            builder = builder.base_url(config.endpoint.as_str());
        }
        builder.build().context(HttpClientSnafu {
            stage: "build-client",
        })
    }

    async fn open_stream(
        &self,
        client: &openai::Client,
        item: &str,
    ) -> ProviderResult<RigStreamingResponse> {
        let model = client.completion_model(self.config.model_id());
        model
            .completion_request(RigMessage::user(item_prompt(item)))
            .preamble(SHOPPING_PREAMBLE.to_string())
            .stream()
            .await
            .context(CompletionsFailedSnafu {
                stage: "open-stream",
            })
    }

    /// Streams one completion and folds its text deltas into a single reply.
    async fn recommend(&self, client: &openai::Client, item: &str) -> ProviderResult<String> {
        let mut stream = self.open_stream(client, item).await?;
        let mut reply = String::new();

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(StreamedAssistantContent::Text(text)) => reply.push_str(&text.text),
                Ok(_) => {}
                Err(source) => {
                    tracing::warn!(
                        item,
                        error = %source,
                        "provider stream emitted an error chunk"
                    );
                    return Err(ProviderError::CompletionsFailed {
                        stage: "stream-chunk",
                        source,
                    });
                }
            }
        }

        ensure!(
            !reply.trim().is_empty(),
            EmptyCompletionSnafu {
                stage: "collect-stream",
                item,
            }
        );
        Ok(reply)
    }
}

impl SubmissionService for RigShoppingAssistant {
    fn submit<'a>(&'a self, text: String) -> BoxFuture<'a, ChatResult<SubmitOutcome>> {
        Box::pin(async move {
            let items = split_items(&text);
            if items.is_empty() {
                tracing::debug!("submission carried no items");
                return Ok(SubmitOutcome::failure(ResultCode::InvalidSubmission));
            }

            let chat_id = self.ai_state.chat_id();
            let client = Self::build_client(&self.config)
                .map_err(|error| ChatError::transport("build-client", error))?;

            tracing::debug!(
                provider_id = %self.config.provider_id,
                model_id = %self.config.model_id(),
                items = items.len(),
                "requesting recommendations"
            );
            let replies = try_join_all(items.iter().map(|item| self.recommend(&client, item)))
                .await
                .map_err(|error| ChatError::transport("recommend", error))?;

            let responses = replies
                .into_iter()
                .map(|reply| Message::assistant(MessageId::generate(), reply))
                .collect();

            let was_new = self.ai_state.record_items(&chat_id, &items);
            Ok(SubmitOutcome::ready(responses, was_new.then_some(NewConversation)))
        })
    }
}

#[cfg(test)]
mod tests {
    use smartshop_core::AiState;

    use super::*;

    fn assistant() -> RigShoppingAssistant {
        RigShoppingAssistant::new(
            ProviderConfig::new("openai", "sk-test", "", None),
            AiStateHandle::new(AiState::new("c1")),
        )
        .expect("api key present")
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let result = RigShoppingAssistant::new(
            ProviderConfig::new("openai", "  ", "", None),
            AiStateHandle::default(),
        );
        assert!(matches!(result, Err(ProviderError::MissingApiKey { .. })));
    }

    #[tokio::test]
    async fn separator_only_text_is_an_invalid_submission() {
        let outcome = assistant()
            .submit(" , ,, ".to_string())
            .await
            .expect("no transport needed");

        match outcome {
            SubmitOutcome::Failure { code } => {
                assert_eq!(code, ResultCode::InvalidSubmission.as_str());
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
