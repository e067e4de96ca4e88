//! The answering agent: retrieve, prompt, chat, resolve.

use std::fmt;
use std::sync::Arc;

use ai_llm_service::OpenAiService;
use rag_store::embed::openai::OpenAiEmbedder;
use rag_store::{EmbeddingsProvider, RagStore};
use tracing::instrument::WithSubscriber;
use tracing::{debug, info};

use crate::cfg::AgentConfig;
use crate::error::AgentError;
use crate::llm::ChatModel;
use crate::prompt::{MAX_CHOICES, SYSTEM_PROMPT, build_user_prompt};
use crate::resolve::{ResolvedIndex, resolve_index};
use crate::retrieve::{ContextRetriever, NoopRetriever, StoreRetriever};
use crate::telemetry::AnswerLog;

/// Answers multiple-choice questions one at a time.
///
/// Each call runs under the agent's [`AnswerLog`]: the question/reply pair is
/// recorded at debug level and unmatched replies at error level.
pub struct McqAgent {
    chat: Arc<dyn ChatModel>,
    retriever: Box<dyn ContextRetriever>,
    log: AnswerLog,
}

impl McqAgent {
    pub fn new(
        chat: Arc<dyn ChatModel>,
        retriever: Box<dyn ContextRetriever>,
        log: AnswerLog,
    ) -> Self {
        Self {
            chat,
            retriever,
            log,
        }
    }

    /// Builds the OpenAI clients, the answer log and, when `cfg.use_rag` is
    /// set, the similarity index over the reference corpus.
    ///
    /// # Errors
    /// Fails on invalid client config, an unopenable log file, a missing
    /// corpus, or any embeddings failure while indexing.
    pub async fn from_config(cfg: AgentConfig) -> Result<Self, AgentError> {
        let log = AnswerLog::open(&cfg.log_path)?;
        let chat = Arc::new(OpenAiService::new(cfg.chat)?);

        let retriever: Box<dyn ContextRetriever> = if cfg.use_rag {
            let svc = Arc::new(OpenAiService::new(cfg.embedding)?);
            let embedder: Arc<dyn EmbeddingsProvider> = Arc::new(OpenAiEmbedder::new(svc));
            let store = RagStore::build(cfg.rag, embedder.as_ref()).await?;
            info!(
                chunks = store.len(),
                with_choices = cfg.retrieve_for_answers,
                "retrieval enabled"
            );
            Box::new(StoreRetriever::new(
                store,
                embedder,
                cfg.retrieve_for_answers,
            ))
        } else {
            info!("retrieval disabled");
            Box::new(NoopRetriever)
        };

        info!(model = %chat.model(), log = ?cfg.log_path, "agent ready");
        Ok(Self::new(chat, retriever, log))
    }

    /// Asks the model and maps its reply to a choice index.
    ///
    /// An unresolvable reply is `Ok(ResolvedIndex::NoMatch)`.
    ///
    /// # Errors
    /// - [`AgentError::TooManyChoices`] for more than 26 choices (no request is sent)
    /// - retrieval and chat failures, unchanged
    pub async fn get_response(
        &self,
        question: &str,
        answer_choices: &[String],
    ) -> Result<ResolvedIndex, AgentError> {
        self.answer(question, answer_choices)
            .with_subscriber(self.log.dispatch().clone())
            .await
    }

    async fn answer(
        &self,
        question: &str,
        answer_choices: &[String],
    ) -> Result<ResolvedIndex, AgentError> {
        if answer_choices.len() > MAX_CHOICES {
            return Err(AgentError::TooManyChoices(answer_choices.len()));
        }

        let context = self.retriever.retrieve(question, answer_choices).await?;
        let user_prompt = build_user_prompt(&context, question, answer_choices);
        let reply = self.chat.complete(SYSTEM_PROMPT, &user_prompt).await?;

        debug!("Question: {question} Model Answer: {reply}");
        Ok(resolve_index(&reply, answer_choices))
    }
}

impl fmt::Debug for McqAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McqAgent").field("log", &self.log).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use std::sync::Mutex;

    struct ScriptedChat {
        reply: Result<String, String>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedChat {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(reason: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(reason.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    impl ChatModel for ScriptedChat {
        fn complete<'a>(
            &'a self,
            system: &'a str,
            user: &'a str,
        ) -> BoxFuture<'a, Result<String, AgentError>> {
            self.prompts
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            let out = self.reply.clone().map_err(AgentError::Config);
            Box::pin(async move { out })
        }
    }

    struct FixedContext(&'static str);

    impl ContextRetriever for FixedContext {
        fn retrieve<'a>(
            &'a self,
            _question: &'a str,
            _answer_choices: &'a [String],
        ) -> BoxFuture<'a, Result<String, AgentError>> {
            Box::pin(async move { Ok(self.0.to_string()) })
        }
    }

    fn choices() -> Vec<String> {
        [
            "uses labeled ddNTPs",
            "uses only dideoxynucleotides",
            "uses only deoxynucleotides",
            "uses labeled dNTPs",
        ]
        .map(String::from)
        .to_vec()
    }

    #[tokio::test]
    async fn resolves_reply_and_sends_both_messages() {
        let chat = ScriptedChat::replying("Answer: Option A");
        let agent = McqAgent::new(
            chat.clone(),
            Box::new(FixedContext("Chain termination uses ddNTPs.")),
            AnswerLog::disabled(),
        );

        let got = agent
            .get_response("What does Sanger sequencing use?", &choices())
            .await
            .unwrap();
        assert_eq!(got, ResolvedIndex::Choice(0));

        let prompts = chat.prompts.lock().unwrap();
        let (system, user) = &prompts[0];
        assert_eq!(system, SYSTEM_PROMPT);
        assert!(user.starts_with("Background Context:\nChain termination uses ddNTPs.\n"));
        assert!(user.contains("Option D: uses labeled dNTPs"));
    }

    #[tokio::test]
    async fn without_retrieval_context_is_empty() {
        let chat = ScriptedChat::replying("Option C");
        let agent = McqAgent::new(chat.clone(), Box::new(NoopRetriever), AnswerLog::disabled());

        let got = agent.get_response("Which?", &choices()).await.unwrap();
        assert_eq!(got.as_sentinel(), 2);
        let prompts = chat.prompts.lock().unwrap();
        assert!(prompts[0].1.starts_with("Background Context:\n\nQuestion: Which?\n"));
    }

    #[tokio::test]
    async fn answers_and_failures_are_written_to_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let agent = McqAgent::new(
            ScriptedChat::replying("I cannot tell."),
            Box::new(NoopRetriever),
            AnswerLog::open(&path).unwrap(),
        );
        let got = agent.get_response("What does Sanger sequencing use?", &choices()).await.unwrap();
        assert_eq!(got.as_sentinel(), -1);
        drop(agent);

        let log = std::fs::read_to_string(&path).unwrap();
        assert!(log.contains("Question: What does Sanger sequencing use? Model Answer: I cannot tell."));
        assert!(log.contains("Cannot find match"));
        assert!(log.contains("uses labeled dNTPs"));
    }

    fn offline_config(dir: &std::path::Path) -> AgentConfig {
        let corpus = dir.join("missing-textbook.txt");
        let log = dir.join("app.log");
        AgentConfig::from_lookup(&move |k: &str| match k {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "REFERENCE_CORPUS_PATH" => Some(corpus.display().to_string()),
            "ANSWER_LOG_PATH" => Some(log.display().to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn without_rag_construction_skips_the_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = offline_config(dir.path());
        cfg.use_rag = false;

        let agent = McqAgent::from_config(cfg).await.unwrap();
        drop(agent);
        assert!(dir.path().join("app.log").exists());
    }

    #[tokio::test]
    async fn with_rag_a_missing_corpus_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = offline_config(dir.path());
        assert!(cfg.use_rag);

        let err = McqAgent::from_config(cfg).await.unwrap_err();
        assert!(matches!(
            err,
            AgentError::Rag(rag_store::RagError::Corpus { .. })
        ));
    }

    #[tokio::test]
    async fn more_than_26_choices_never_reach_the_model() {
        let chat = ScriptedChat::replying("Option A");
        let agent = McqAgent::new(chat.clone(), Box::new(NoopRetriever), AnswerLog::disabled());
        let many: Vec<String> = (0..27).map(|i| format!("choice {i}")).collect();

        let err = agent.get_response("q", &many).await.unwrap_err();
        assert!(matches!(err, AgentError::TooManyChoices(27)));
        assert_eq!(chat.calls(), 0);
    }

    #[tokio::test]
    async fn chat_failures_propagate() {
        let agent = McqAgent::new(
            ScriptedChat::failing("rate limited"),
            Box::new(NoopRetriever),
            AnswerLog::disabled(),
        );
        let err = agent.get_response("q", &choices()).await.unwrap_err();
        assert!(matches!(err, AgentError::Config(ref m) if m == "rate limited"));
    }
}
