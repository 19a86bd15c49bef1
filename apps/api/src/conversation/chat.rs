use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::conversation::assembler::relay;
use crate::conversation::prompts::{
    build_system_prompt, ConceptLevel, CODE_EXAMPLE_PROMPT_TEMPLATE,
    EXPLAIN_CONCEPT_PROMPT_TEMPLATE, PROJECT_SUMMARY_PROMPT_TEMPLATE, RECRUITER_PITCH_PROMPT,
};
use crate::conversation::session::{ConversationMessage, ConversationSession, Role};
use crate::knowledge::KnowledgeBase;
use crate::llm_client::{LanguageModel, LlmError, ModelRequest, TextStream};

pub const CHAT_MAX_TOKENS: u32 = 2048;
pub const CODE_EXAMPLE_MAX_TOKENS: u32 = 2048;
pub const PROJECT_SUMMARY_MAX_TOKENS: u32 = 1024;
pub const EXPLAIN_MAX_TOKENS: u32 = 1024;
pub const RECRUITER_PITCH_MAX_TOKENS: u32 = 512;

pub const DEFAULT_CODE_LANGUAGE: &str = "python";

/// LLM-backed responder. Owns the system prompt and the one conversation session.
///
/// The session sits behind an async mutex and every turn holds it from the user
/// append until the reply is committed (or abandoned), so turns never interleave.
pub struct ChatBot {
    model: Arc<dyn LanguageModel>,
    system_prompt: String,
    session: Arc<Mutex<ConversationSession>>,
}

impl ChatBot {
    pub fn new(model: Arc<dyn LanguageModel>, knowledge: &KnowledgeBase) -> Self {
        let system_prompt = build_system_prompt(knowledge);
        info!("System prompt built ({} chars)", system_prompt.len());
        Self {
            model,
            system_prompt,
            session: Arc::new(Mutex::new(ConversationSession::new())),
        }
    }

    /// One full turn. On failure the user message stays in the log and no
    /// assistant message is added.
    pub async fn chat(&self, query: &str) -> Result<String, LlmError> {
        let mut session = self.session.lock().await;
        session.append(Role::User, query);
        let messages = session.snapshot();

        let reply = self
            .model
            .complete(ModelRequest {
                system: &self.system_prompt,
                messages: &messages,
                max_tokens: CHAT_MAX_TOKENS,
            })
            .await?;

        session.append(Role::Assistant, reply.clone());
        debug!("Chat turn committed, session has {} messages", session.len());
        Ok(reply)
    }

    /// Streamed turn. The returned stream owns the session lock; the assembled
    /// reply is committed only if the stream runs to completion.
    pub async fn chat_stream(&self, query: &str) -> Result<TextStream, LlmError> {
        let mut session = Arc::clone(&self.session).lock_owned().await;
        session.append(Role::User, query);
        let messages = session.snapshot();

        let upstream = self
            .model
            .stream(ModelRequest {
                system: &self.system_prompt,
                messages: &messages,
                max_tokens: CHAT_MAX_TOKENS,
            })
            .await?;

        Ok(relay(upstream, session))
    }

    pub async fn reset(&self) {
        let mut session = self.session.lock().await;
        if !session.is_empty() {
            info!("Conversation reset, {} messages dropped", session.len());
            session.clear();
        }
    }

    pub async fn history(&self) -> Vec<ConversationMessage> {
        self.session.lock().await.snapshot()
    }

    // One-shot prompts: single user message, session untouched.

    async fn one_shot(&self, prompt: String, max_tokens: u32) -> Result<String, LlmError> {
        let messages = [ConversationMessage::user(prompt)];
        self.model
            .complete(ModelRequest {
                system: &self.system_prompt,
                messages: &messages,
                max_tokens,
            })
            .await
    }

    pub async fn code_example(&self, topic: &str, language: Option<&str>) -> Result<String, LlmError> {
        let prompt = CODE_EXAMPLE_PROMPT_TEMPLATE
            .replace("{language}", language.unwrap_or(DEFAULT_CODE_LANGUAGE))
            .replace("{topic}", topic);
        self.one_shot(prompt, CODE_EXAMPLE_MAX_TOKENS).await
    }

    pub async fn project_summary(&self, project: &str) -> Result<String, LlmError> {
        let prompt = PROJECT_SUMMARY_PROMPT_TEMPLATE.replace("{project}", project);
        self.one_shot(prompt, PROJECT_SUMMARY_MAX_TOKENS).await
    }

    pub async fn recruiter_pitch(&self) -> Result<String, LlmError> {
        self.one_shot(RECRUITER_PITCH_PROMPT.to_string(), RECRUITER_PITCH_MAX_TOKENS)
            .await
    }

    pub async fn explain_concept(&self, concept: &str, level: ConceptLevel) -> Result<String, LlmError> {
        let prompt = EXPLAIN_CONCEPT_PROMPT_TEMPLATE
            .replace("{concept}", concept)
            .replace("{level}", level.as_str());
        self.one_shot(prompt, EXPLAIN_MAX_TOKENS).await
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;

    use crate::conversation::session::ConversationMessage;
    use crate::llm_client::{LanguageModel, LlmError, ModelRequest, TextStream};

    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub system: String,
        pub messages: Vec<ConversationMessage>,
        pub max_tokens: u32,
    }

    /// Replies with a fixed text (split on spaces when streamed), or fails when `reply` is `None`.
    pub struct ScriptedModel {
        reply: Option<&'static str>,
        pub requests: StdMutex<Vec<RecordedRequest>>,
    }

    impl ScriptedModel {
        pub fn replying(reply: &'static str) -> Self {
            Self {
                reply: Some(reply),
                requests: StdMutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                requests: StdMutex::new(Vec::new()),
            }
        }

        fn record(&self, request: &ModelRequest<'_>) {
            self.requests.lock().unwrap().push(RecordedRequest {
                system: request.system.to_string(),
                messages: request.messages.to_vec(),
                max_tokens: request.max_tokens,
            });
        }

        fn reply(&self) -> Result<&'static str, LlmError> {
            self.reply.ok_or_else(|| LlmError::Api {
                status: 529,
                message: "Overloaded".to_string(),
            })
        }

        pub fn last_request(&self) -> RecordedRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, request: ModelRequest<'_>) -> Result<String, LlmError> {
            self.record(&request);
            self.reply().map(str::to_string)
        }

        async fn stream(&self, request: ModelRequest<'_>) -> Result<TextStream, LlmError> {
            self.record(&request);
            let fragments: Vec<Result<String, LlmError>> = self
                .reply()?
                .split_inclusive(' ')
                .map(|f| Ok(f.to_string()))
                .collect();
            Ok(Box::pin(futures::stream::iter(fragments)))
        }
    }
}
