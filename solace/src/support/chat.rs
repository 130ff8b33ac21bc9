use crate::error::{Result, SolaceError};
use crate::llm::{prompts, LlmProvider};
use crate::support::types::ConversationTurn;

/// Substituted when the model answers with an empty completion. A follow-up
/// question is safer than silence, but only on the conversational path;
/// analytics paths treat an empty reply as a failed extraction instead.
const EMPTY_REPLY_PROMPT: &str =
    "I'm here with you. Could you tell me a little more about what's on your mind?";

/// The conversational operation. Unlike the analytics operations, this one
/// fails loudly: a fabricated therapeutic reply is worse than an honest
/// error, so gateway failures surface as `ServiceUnavailable` instead of a
/// canned response.
pub struct TherapyChat {
    llm: LlmProvider,
    model: String,
}

impl Clone for TherapyChat {
    fn clone(&self) -> Self {
        Self {
            llm: self.llm.clone(),
            model: self.model.clone(),
        }
    }
}

impl TherapyChat {
    pub fn new(llm: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Produce a therapeutic reply to the latest message, given the
    /// conversation so far. Only the most recent turns are submitted
    /// upstream (see [`prompts::HISTORY_WINDOW`]).
    pub async fn reply(
        &self,
        history: &[ConversationTurn],
        latest_message: &str,
    ) -> Result<String> {
        if !self.llm.is_available() {
            tracing::warn!("LLM unavailable, cannot produce therapy reply");
            return Err(SolaceError::ServiceUnavailable);
        }

        let spec = prompts::therapy_reply(&self.model, history, latest_message);

        match self.llm.complete(&spec, "therapy_reply").await {
            Ok(reply) if reply.trim().is_empty() => Ok(EMPTY_REPLY_PROMPT.to_string()),
            Ok(reply) => Ok(reply),
            Err(error) => {
                tracing::warn!(error = %error, "therapy reply failed");
                Err(SolaceError::ServiceUnavailable)
            }
        }
    }
}
