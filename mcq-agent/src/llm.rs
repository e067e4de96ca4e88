//! Chat seam used by the agent.

use ai_llm_service::OpenAiService;
use futures::future::BoxFuture;

use crate::error::AgentError;

/// Non-streaming chat completion: `(system, user)` in, assistant text out.
///
/// Implemented for [`OpenAiService`]; tests plug in canned replies.
pub trait ChatModel: Send + Sync {
    fn complete<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
    ) -> BoxFuture<'a, Result<String, AgentError>>;
}

impl ChatModel for OpenAiService {
    fn complete<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
    ) -> BoxFuture<'a, Result<String, AgentError>> {
        Box::pin(async move { Ok(self.generate(user, Some(system)).await?) })
    }
}
