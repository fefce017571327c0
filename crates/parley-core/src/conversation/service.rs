//! Conversation service: the two model-backed operations.
//!
//! `generate_response` records the user turn, renders the session history
//! into a chat prompt, calls the provider once, and records the AI turn
//! only on success. `conversation_report` never touches the store.
//!
//! Provider failures come back as a typed `LlmError`; the HTTP layer decides
//! how to present them.

use std::sync::Arc;
use std::time::Instant;

use tracing::{Instrument, info, info_span, warn};

use parley_types::conversation::Sender;
use parley_types::llm::{CompletionRequest, LlmError};

use crate::llm::box_provider::BoxLlmProvider;
use crate::prompt::{ChatPrompt, ReportPrompt};

use super::store::ConversationStore;

/// Successful chat continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub session_id: String,
}

/// Sampling settings applied to every request this service sends.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampling {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

/// Orchestrates store, prompt rendering and provider calls.
pub struct ConversationService {
    store: Arc<ConversationStore>,
    provider: BoxLlmProvider,
    sampling: Sampling,
}

impl ConversationService {
    pub fn new(store: Arc<ConversationStore>, provider: BoxLlmProvider) -> Self {
        Self {
            store,
            provider,
            sampling: Sampling::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// The backing conversation store.
    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Continue the session's conversation with `user_input`.
    ///
    /// The user turn is recorded before the model call and stays recorded
    /// even if the call fails. A failed call appends nothing else.
    pub async fn generate_response(
        &self,
        session_id: &str,
        user_input: &str,
    ) -> Result<ChatReply, LlmError> {
        self.store.add_message(session_id, Sender::User, user_input);

        let history = self.store.get_conversation(session_id);
        let prompt = ChatPrompt::build(&history);

        match self.complete("chat", prompt).await {
            Ok(text) => {
                self.store.add_message(session_id, Sender::Ai, text.clone());
                info!(session_id, turns = history.len() + 1, "chat turn recorded");
                Ok(ChatReply {
                    text,
                    session_id: session_id.to_string(),
                })
            }
            Err(e) => {
                warn!(session_id, error = %e, "chat generation failed");
                Err(e)
            }
        }
    }

    /// Produce a language skills report for a caller-supplied transcript.
    pub async fn conversation_report(&self, transcript: &str) -> Result<String, LlmError> {
        let prompt = ReportPrompt::build(transcript);

        self.complete("conversation_report", prompt)
            .await
            .inspect_err(|e| warn!(error = %e, "report generation failed"))
    }

    /// Single attempt against the provider; returns the trimmed text.
    async fn complete(&self, operation: &'static str, prompt: String) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: String::new(),
            prompt,
            max_tokens: self.sampling.max_tokens,
            temperature: self.sampling.temperature,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.operation.name = operation,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = self.provider.model(),
            gen_ai.request.max_tokens = ?request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let start = Instant::now();
        let response = self.provider.complete(&request).instrument(span).await?;

        info!(
            operation,
            provider = self.provider.name(),
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "model call completed"
        );

        Ok(response.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Mutex;

    use super::*;
    use crate::llm::provider::LlmProvider;
    use crate::prompt::{CHAT_INSTRUCTIONS, REPORT_INSTRUCTIONS};
    use parley_types::conversation::Turn;
    use parley_types::llm::{CompletionResponse, StopReason, Usage};

    // --- Mock provider ---

    #[derive(Clone)]
    enum MockResult {
        Success(String),
        Error(String),
    }

    /// Replies with a canned result and records every prompt it receives.
    struct MockProvider {
        result: MockResult,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl MockProvider {
        fn ok(text: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
            Self::with(MockResult::Success(text.to_string()))
        }

        fn failing(message: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
            Self::with(MockResult::Error(message.to_string()))
        }

        fn with(result: MockResult) -> (Self, Arc<Mutex<Vec<String>>>) {
            let prompts = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    result,
                    prompts: Arc::clone(&prompts),
                },
                prompts,
            )
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }

        fn complete(
            &self,
            request: &CompletionRequest,
        ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            let result = self.result.clone();
            async move {
                match result {
                    MockResult::Success(content) => Ok(CompletionResponse {
                        content,
                        model: "mock-model".to_string(),
                        stop_reason: StopReason::EndTurn,
                        usage: Usage::default(),
                    }),
                    MockResult::Error(message) => Err(LlmError::Provider { message }),
                }
            }
        }
    }

    fn service(provider: MockProvider) -> ConversationService {
        ConversationService::new(
            Arc::new(ConversationStore::new()),
            BoxLlmProvider::new(provider),
        )
    }

    // --- Tests ---

    #[tokio::test]
    async fn successful_reply_records_both_turns() {
        let (provider, _) = MockProvider::ok("Hello! How are you?");
        let svc = service(provider);

        let reply = svc.generate_response("s1", "Hi").await.unwrap();

        assert_eq!(
            reply,
            ChatReply {
                text: "Hello! How are you?".to_string(),
                session_id: "s1".to_string(),
            }
        );
        assert_eq!(
            svc.store().get_conversation("s1"),
            vec![Turn::user("Hi"), Turn::ai("Hello! How are you?")]
        );
    }

    #[tokio::test]
    async fn reply_text_is_trimmed() {
        let (provider, _) = MockProvider::ok("\n  Nice to meet you.  \n");
        let svc = service(provider);

        let reply = svc.generate_response("s1", "Hi").await.unwrap();

        assert_eq!(reply.text, "Nice to meet you.");
        assert_eq!(svc.store().get_conversation("s1")[1], Turn::ai("Nice to meet you."));
    }

    #[tokio::test]
    async fn blank_reply_is_recorded_as_empty_ai_turn() {
        let (provider, _) = MockProvider::ok("  \n");
        let svc = service(provider);

        let reply = svc.generate_response("s1", "Hi").await.unwrap();
        assert_eq!(reply.text, "");
        assert_eq!(
            svc.store().get_conversation("s1"),
            vec![Turn::user("Hi"), Turn::ai("")]
        );

        assert_eq!(svc.conversation_report("User: Hi").await.unwrap(), "");
    }

    #[tokio::test]
    async fn failed_reply_keeps_only_user_turn() {
        let (provider, _) = MockProvider::failing("quota exceeded");
        let svc = service(provider);

        let err = svc.generate_response("s1", "Hi").await.unwrap_err();

        assert_eq!(err.to_string(), "quota exceeded");
        assert_eq!(svc.store().get_conversation("s1"), vec![Turn::user("Hi")]);
    }

    #[tokio::test]
    async fn prompt_includes_full_history_with_new_input() {
        let (provider, prompts) = MockProvider::ok("Sure.");
        let svc = service(provider);

        svc.generate_response("s1", "Hi").await.unwrap();
        svc.generate_response("s1", "Tell me more").await.unwrap();

        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].starts_with(CHAT_INSTRUCTIONS));
        assert!(prompts[0].ends_with("User: Hi\n\nAI:"));
        assert!(prompts[1].ends_with("User: Hi\nAI: Sure.\nUser: Tell me more\n\nAI:"));
    }

    #[tokio::test]
    async fn empty_input_is_still_recorded() {
        let (provider, _) = MockProvider::ok("Are you there?");
        let svc = service(provider);

        svc.generate_response("default", "").await.unwrap();

        assert_eq!(
            svc.store().get_conversation("default"),
            vec![Turn::user(""), Turn::ai("Are you there?")]
        );
    }

    #[tokio::test]
    async fn report_does_not_touch_store() {
        let (provider, prompts) = MockProvider::ok("  Good grammar overall.  ");
        let svc = service(provider);

        let report = svc.conversation_report("User: I goes home").await.unwrap();

        assert_eq!(report, "Good grammar overall.");
        assert!(svc.store().is_empty());
        assert!(prompts.lock().unwrap()[0].contains("User: I goes home"));
    }

    #[tokio::test]
    async fn report_on_empty_transcript_sends_instructions_only() {
        let (provider, prompts) = MockProvider::ok("Nothing to assess.");
        let svc = service(provider);

        let report = svc.conversation_report("").await.unwrap();

        assert_eq!(report, "Nothing to assess.");
        let prompts = prompts.lock().unwrap();
        assert!(prompts[0].starts_with(REPORT_INSTRUCTIONS));
        assert_eq!(prompts[0], ReportPrompt::build(""));
    }

    #[tokio::test]
    async fn report_failure_is_returned() {
        let (provider, _) = MockProvider::failing("network unreachable");
        let svc = service(provider);

        let err = svc.conversation_report("User: hi").await.unwrap_err();

        assert_eq!(err.to_string(), "network unreachable");
        assert!(svc.store().is_empty());
    }

    #[tokio::test]
    async fn sampling_settings_are_forwarded() {
        struct CaptureProvider {
            seen: Arc<Mutex<Option<(Option<f64>, Option<u32>)>>>,
        }

        impl LlmProvider for CaptureProvider {
            fn name(&self) -> &str {
                "capture"
            }

            fn model(&self) -> &str {
                "capture-model"
            }

            fn complete(
                &self,
                request: &CompletionRequest,
            ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
                *self.seen.lock().unwrap() = Some((request.temperature, request.max_tokens));
                async {
                    Ok(CompletionResponse {
                        content: "ok".to_string(),
                        model: "capture-model".to_string(),
                        stop_reason: StopReason::EndTurn,
                        usage: Usage::default(),
                    })
                }
            }
        }

        let seen = Arc::new(Mutex::new(None));
        let svc = ConversationService::new(
            Arc::new(ConversationStore::new()),
            BoxLlmProvider::new(CaptureProvider {
                seen: Arc::clone(&seen),
            }),
        )
        .with_sampling(Sampling {
            temperature: Some(0.4),
            max_tokens: Some(256),
        });

        svc.conversation_report("x").await.unwrap();

        assert_eq!(*seen.lock().unwrap(), Some((Some(0.4), Some(256))));
    }
}
