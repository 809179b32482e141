//! ProcessSpeechHandler - Advance an intake dialogue by one patient utterance
//!
//! Per utterance:
//! 1. Resolve the session; unknown ids ask the caller to restart.
//! 2. Record the utterance as a patient turn.
//! 3. Once past the configured turn threshold, check for a complete record by
//!    extracting from the whole transcript. A complete record ends the session.
//! 4. Otherwise ask the model for the next question and record it.
//!
//! Extraction problems never reach the caller: they are logged and the
//! dialogue simply continues.

use std::sync::Arc;

use thiserror::Error;

use crate::config::IntakeConfig;
use crate::domain::foundation::SessionId;
use crate::domain::intake::prompts::{extraction_prompt, next_question_prompt, COMPLETION_MESSAGE};
use crate::domain::intake::{
    is_complete, missing_required_fields, parse_extraction, ExtractionError, RegistrationField,
    RegistrationRecord, Session,
};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata, RequestPurpose,
    SessionStore, SessionStoreError,
};

/// Command to process one patient utterance
#[derive(Debug, Clone)]
pub struct ProcessSpeechCommand {
    /// `None` when the caller sent no id or one that does not parse
    pub session_id: Option<SessionId>,
    pub user_input: String,
}

/// Result of processing an utterance
#[derive(Debug, Clone)]
pub enum ProcessSpeechResult {
    /// The dialogue goes on; `message` is the next question.
    Continuing {
        session_id: SessionId,
        message: String,
        turns_counted: u32,
    },
    /// Every field was collected; the session no longer exists.
    Completed {
        message: String,
        record: RegistrationRecord,
        turns_counted: u32,
    },
}

impl ProcessSpeechResult {
    pub fn message(&self) -> &str {
        match self {
            ProcessSpeechResult::Continuing { message, .. } => message,
            ProcessSpeechResult::Completed { message, .. } => message,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ProcessSpeechResult::Completed { .. })
    }
}

/// Error type for processing utterances
#[derive(Debug, Error)]
pub enum ProcessSpeechError {
    /// Missing or unknown session id
    #[error("Invalid session")]
    InvalidSession,

    /// The conversational model call failed
    #[error("AI Provider error: {0}")]
    Gateway(#[from] AIError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SessionStoreError> for ProcessSpeechError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(_) => ProcessSpeechError::InvalidSession,
            other => ProcessSpeechError::Storage(other.to_string()),
        }
    }
}

/// Why an extraction attempt produced no record
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error("extraction call failed: {0}")]
    Gateway(#[from] AIError),

    #[error("extraction output unusable: {0}")]
    Parse(#[from] ExtractionError),
}

/// Outcome of probing the transcript for a complete record
#[derive(Debug)]
pub enum ExtractionOutcome {
    Complete(RegistrationRecord),
    Incomplete {
        record: RegistrationRecord,
        missing: Vec<RegistrationField>,
    },
    Failed(ExtractionFailure),
}

/// Handler driving the intake dialogue
pub struct ProcessSpeechHandler<P: ?Sized + AIProvider> {
    store: Arc<dyn SessionStore>,
    ai_provider: Arc<P>,
    config: IntakeConfig,
}

impl<P: ?Sized + AIProvider> ProcessSpeechHandler<P> {
    pub fn new(store: Arc<dyn SessionStore>, ai_provider: Arc<P>, config: IntakeConfig) -> Self {
        Self {
            store,
            ai_provider,
            config,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessSpeechCommand,
    ) -> Result<ProcessSpeechResult, ProcessSpeechError> {
        let session_id = cmd.session_id.ok_or(ProcessSpeechError::InvalidSession)?;
        let mut session = self.store.get(session_id).await?;

        let utterance = cmd.user_input.trim().to_string();
        let turn = session.record_utterance(utterance.clone());
        tracing::info!(session = %session_id.short(), turn, "Patient utterance received");
        tracing::debug!(session = %session_id.short(), turn, utterance = %utterance, "Patient said");

        if self.config.should_attempt_extraction(turn) {
            tracing::info!(session = %session_id.short(), turn, "Checking if all fields collected");

            match self.attempt_extraction(&session, turn).await {
                ExtractionOutcome::Complete(record) => {
                    return self.complete(session, record).await;
                }
                ExtractionOutcome::Incomplete { missing, .. } => {
                    let names = missing.iter().map(|f| f.key()).collect::<Vec<_>>();
                    tracing::info!(
                        session = %session_id.short(),
                        turn,
                        missing = %names.join(", "),
                        "Record incomplete, continuing conversation"
                    );
                }
                ExtractionOutcome::Failed(failure) => {
                    tracing::warn!(
                        session = %session_id.short(),
                        turn,
                        error = %failure,
                        "Extraction unavailable, continuing conversation"
                    );
                }
            }
        }

        let reply = match self.generate_reply(&session, &utterance, turn).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(
                    session = %session_id.short(),
                    turn,
                    error = %err,
                    "Conversation call failed"
                );
                // Keep the patient's turn so the transcript reflects what was said.
                self.store.update(&session).await?;
                return Err(err.into());
            }
        };

        session.record_reply(reply.clone());
        self.store.update(&session).await?;
        tracing::debug!(session = %session_id.short(), turn, reply = %reply, "Assistant replied");

        Ok(ProcessSpeechResult::Continuing {
            session_id,
            message: reply,
            turns_counted: turn,
        })
    }

    /// Extracts a record from the full transcript and checks completion.
    pub async fn attempt_extraction(&self, session: &Session, turn: u32) -> ExtractionOutcome {
        let profile = self.config.extraction;
        let request = CompletionRequest::new(RequestMetadata::for_turn(
            session.id,
            RequestPurpose::Extraction,
            turn,
        ))
        .with_message(MessageRole::User, extraction_prompt(&session.conversation))
        .with_temperature(profile.temperature)
        .with_max_tokens(profile.max_tokens);

        let response = match self.ai_provider.complete(request).await {
            Ok(response) => response,
            Err(err) => return ExtractionOutcome::Failed(err.into()),
        };

        let record = match parse_extraction(&response.content) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(
                    session = %session.id.short(),
                    error = %err,
                    raw = %response.content,
                    "Could not parse extraction output"
                );
                return ExtractionOutcome::Failed(err.into());
            }
        };

        if is_complete(Some(&record)) {
            ExtractionOutcome::Complete(record)
        } else {
            let missing = missing_required_fields(&record);
            ExtractionOutcome::Incomplete { record, missing }
        }
    }

    async fn generate_reply(
        &self,
        session: &Session,
        utterance: &str,
        turn: u32,
    ) -> Result<String, AIError> {
        let profile = self.config.conversation;
        let request = CompletionRequest::new(RequestMetadata::for_turn(
            session.id,
            RequestPurpose::Conversation,
            turn,
        ))
        .with_system_prompt(next_question_prompt(&session.conversation))
        .with_message(MessageRole::User, utterance)
        .with_temperature(profile.temperature)
        .with_max_tokens(profile.max_tokens);

        let response = self.ai_provider.complete(request).await?;
        Ok(response.content.trim().to_string())
    }

    async fn complete(
        &self,
        mut session: Session,
        record: RegistrationRecord,
    ) -> Result<ProcessSpeechResult, ProcessSpeechError> {
        session.record_reply(COMPLETION_MESSAGE);
        self.store.delete(session.id).await?;

        tracing::info!(
            session = %session.id.short(),
            turns = session.turns_counted,
            elapsed_secs = session.age().num_seconds(),
            "All fields collected, registration complete"
        );

        Ok(ProcessSpeechResult::Completed {
            message: COMPLETION_MESSAGE.to_string(),
            record,
            turns_counted: session.turns_counted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError, MockResponse};
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::prompts::GREETING;
    use crate::domain::intake::TurnRole;
    use crate::ports::FinishReason;

    fn reply(content: &str) -> MockResponse {
        MockResponse::Success {
            content: content.to_string(),
            usage: Default::default(),
            finish_reason: FinishReason::Stop,
        }
    }

    const COMPLETE_JSON: &str = r#"```json
{
  "fullName": "John Smith", "age": "34", "gender": "male", "contactNumber": "555-1234",
  "email": "", "address": "123 Main St", "chiefComplaint": "headache",
  "medicalHistory": "", "allergies": "", "currentMedications": "",
  "emergencyContactName": "Jane Doe", "emergencyContactRelationship": "sister",
  "emergencyContactPhone": "555-9999"
}
```"#;

    const PARTIAL_JSON: &str = r#"{"fullName": "John Smith", "age": "34"}"#;

    struct Fixture {
        store: Arc<InMemorySessionStore>,
        provider: Arc<MockAIProvider>,
        handler: ProcessSpeechHandler<MockAIProvider>,
    }

    fn fixture(provider: MockAIProvider) -> Fixture {
        fixture_with_config(provider, IntakeConfig::default())
    }

    fn fixture_with_config(provider: MockAIProvider, config: IntakeConfig) -> Fixture {
        let store = Arc::new(InMemorySessionStore::new());
        let provider = Arc::new(provider);
        let handler = ProcessSpeechHandler::new(store.clone(), provider.clone(), config);
        Fixture {
            store,
            provider,
            handler,
        }
    }

    fn cmd(session_id: SessionId, input: &str) -> ProcessSpeechCommand {
        ProcessSpeechCommand {
            session_id: Some(session_id),
            user_input: input.to_string(),
        }
    }

    async fn run_turns(f: &Fixture, session_id: SessionId, n: u32) {
        for i in 0..n {
            let result = f.handler.handle(cmd(session_id, &format!("answer {}", i))).await.unwrap();
            assert!(!result.is_completed());
        }
    }

    #[tokio::test]
    async fn test_missing_session_id_is_invalid() {
        let f = fixture(MockAIProvider::new());

        let result = f
            .handler
            .handle(ProcessSpeechCommand {
                session_id: None,
                user_input: "hello".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ProcessSpeechError::InvalidSession)));
        assert_eq!(f.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_session_is_invalid() {
        let f = fixture(MockAIProvider::new());

        let result = f.handler.handle(cmd(SessionId::new(), "hello")).await;

        assert!(matches!(result, Err(ProcessSpeechError::InvalidSession)));
        assert_eq!(f.store.active_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_utterance_and_reply_are_recorded() {
        let f = fixture(MockAIProvider::new().with_response("  How old are you?  "));
        let session = f.store.create(GREETING).await.unwrap();

        let result = f.handler.handle(cmd(session.id, "  John Smith ")).await.unwrap();

        assert_eq!(result.message(), "How old are you?");
        let stored = f.store.get(session.id).await.unwrap();
        assert_eq!(stored.turns_counted, 1);
        assert_eq!(stored.conversation.len(), 3);
        assert_eq!(stored.conversation[1].role, TurnRole::User);
        assert_eq!(stored.conversation[1].content, "John Smith");
        assert_eq!(stored.conversation[2].content, "How old are you?");
    }

    #[tokio::test]
    async fn test_conversation_call_uses_conversation_profile() {
        let f = fixture(MockAIProvider::new().with_response("Next?"));
        let session = f.store.create(GREETING).await.unwrap();

        f.handler.handle(cmd(session.id, "John Smith")).await.unwrap();

        let calls = f.provider.get_calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.purpose(), RequestPurpose::Conversation);
        assert_eq!(call.temperature, Some(0.6));
        assert_eq!(call.max_tokens, Some(120));
        let system = call.system_prompt.as_deref().unwrap();
        assert!(system.contains("2. PATIENT: John Smith"));
        assert_eq!(call.messages.len(), 1);
        assert_eq!(call.messages[0].content, "John Smith");
    }

    #[tokio::test]
    async fn test_no_extraction_before_threshold() {
        let f = fixture(MockAIProvider::new());
        let session = f.store.create(GREETING).await.unwrap();

        run_turns(&f, session.id, 9).await;

        assert_eq!(f.provider.call_count_for(RequestPurpose::Extraction), 0);
        assert_eq!(f.provider.call_count_for(RequestPurpose::Conversation), 9);

        run_turns(&f, session.id, 1).await;

        assert_eq!(f.provider.call_count_for(RequestPurpose::Extraction), 1);
        assert_eq!(f.provider.call_count_for(RequestPurpose::Conversation), 10);
    }

    #[tokio::test]
    async fn test_extraction_uses_extraction_profile_and_full_transcript() {
        let f = fixture(MockAIProvider::new());
        let session = f.store.create(GREETING).await.unwrap();
        run_turns(&f, session.id, 10).await;

        let extraction = f
            .provider
            .get_calls()
            .into_iter()
            .find(|c| c.purpose() == RequestPurpose::Extraction)
            .unwrap();

        assert_eq!(extraction.temperature, Some(0.05));
        assert_eq!(extraction.max_tokens, Some(700));
        assert!(extraction.system_prompt.is_none());
        let prompt = &extraction.messages[0].content;
        assert!(prompt.contains("RECEPTIONIST: Hello!"));
        assert!(prompt.contains("PATIENT: answer 9"));
    }

    #[tokio::test]
    async fn test_complete_extraction_ends_session() {
        let provider = MockAIProvider::new();
        for _ in 0..9 {
            provider.push(reply("Next question?"));
        }
        let f = fixture(provider.with_response(COMPLETE_JSON));
        let session = f.store.create(GREETING).await.unwrap();
        run_turns(&f, session.id, 9).await;

        let result = f.handler.handle(cmd(session.id, "555-9999")).await.unwrap();

        match result {
            ProcessSpeechResult::Completed {
                message,
                record,
                turns_counted,
            } => {
                assert_eq!(message, COMPLETION_MESSAGE);
                assert_eq!(turns_counted, 10);
                assert_eq!(record.get(RegistrationField::Gender), Some("Male"));
                assert_eq!(record.get(RegistrationField::Email), Some(""));
                assert_eq!(record.present_count(), 13);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert!(!f.store.contains(session.id).await);
        // Completion short-circuits the conversational reply.
        assert_eq!(f.provider.call_count_for(RequestPurpose::Conversation), 9);
    }

    #[tokio::test]
    async fn test_incomplete_extraction_continues_and_retries_next_turn() {
        let provider = MockAIProvider::new();
        let f = fixture(provider);
        let session = f.store.create(GREETING).await.unwrap();
        run_turns(&f, session.id, 9).await;

        f.provider.push(reply(PARTIAL_JSON));
        f.provider.push(reply("What's your phone number?"));
        let result = f.handler.handle(cmd(session.id, "headache")).await.unwrap();

        assert_eq!(result.message(), "What's your phone number?");
        assert!(f.store.contains(session.id).await);

        run_turns(&f, session.id, 1).await;
        assert_eq!(f.provider.call_count_for(RequestPurpose::Extraction), 2);
        assert_eq!(f.store.get(session.id).await.unwrap().turns_counted, 11);
    }

    #[tokio::test]
    async fn test_extraction_gateway_failure_is_absorbed() {
        let f = fixture(MockAIProvider::new());
        let session = f.store.create(GREETING).await.unwrap();
        run_turns(&f, session.id, 9).await;

        f.provider.push(MockResponse::Error(MockError::Unavailable {
            message: "down".to_string(),
        }));
        let result = f.handler.handle(cmd(session.id, "sister")).await;

        assert!(matches!(result, Ok(ProcessSpeechResult::Continuing { .. })));
    }

    #[tokio::test]
    async fn test_conversation_failure_surfaces_gateway_error() {
        let f = fixture(MockAIProvider::new().with_error(MockError::Network {
            message: "connection reset".to_string(),
        }));
        let session = f.store.create(GREETING).await.unwrap();

        let result = f.handler.handle(cmd(session.id, "John Smith")).await;

        assert!(matches!(result, Err(ProcessSpeechError::Gateway(_))));
        let stored = f.store.get(session.id).await.unwrap();
        assert_eq!(stored.turns_counted, 1);
        assert_eq!(stored.conversation.len(), 2);
    }

    #[tokio::test]
    async fn test_attempt_extraction_reports_missing_fields() {
        let f = fixture(MockAIProvider::new().with_response(PARTIAL_JSON));
        let session = f.store.create(GREETING).await.unwrap();

        let outcome = f.handler.attempt_extraction(&session, 10).await;

        match outcome {
            ExtractionOutcome::Incomplete { missing, record } => {
                assert!(missing.contains(&RegistrationField::Gender));
                assert!(!missing.contains(&RegistrationField::FullName));
                assert!(!missing.contains(&RegistrationField::Email));
                assert_eq!(record.present_count(), 13);
            }
            other => panic!("expected incomplete, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_attempt_extraction_parse_failure() {
        let f = fixture(MockAIProvider::new().with_response("I could not find any data."));
        let session = f.store.create(GREETING).await.unwrap();

        let outcome = f.handler.attempt_extraction(&session, 10).await;

        assert!(matches!(
            outcome,
            ExtractionOutcome::Failed(ExtractionFailure::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_custom_threshold_and_interval() {
        let config = IntakeConfig {
            extraction_turn_threshold: 2,
            extraction_interval: 2,
            ..Default::default()
        };
        let f = fixture_with_config(MockAIProvider::new(), config);
        let session = f.store.create(GREETING).await.unwrap();

        run_turns(&f, session.id, 5).await;

        // attempts on turns 2 and 4
        assert_eq!(f.provider.call_count_for(RequestPurpose::Extraction), 2);
    }
}
