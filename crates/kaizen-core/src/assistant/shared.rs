use crate::assistant::context::AssistantContext;
use crate::assistant::error::AssistantError;
use crate::assistant::session::{AssistantSession, AssistantState, PendingTurn, read_reply};
use crate::assistant::{LlmProvider, ProviderReply};
use kaizen_model::chat::ChatMessage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// An [`AssistantSession`] that can be asked from several tasks.
///
/// The lock is only held for state transitions, never while the provider is working, so a
/// second question arriving during an answer is rejected with [`AssistantError::Busy`]
/// instead of queueing. [`close`](Self::close) aborts the running answer.
#[derive(Debug, Clone)]
pub struct SharedAssistantSession {
    inner: Arc<Mutex<AssistantSession>>,
    token: CancellationToken,
}

impl SharedAssistantSession {
    #[must_use]
    pub fn new(session: AssistantSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
            token: CancellationToken::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AssistantSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.lock().transcript().to_vec()
    }

    #[must_use]
    pub fn state(&self) -> AssistantState {
        self.lock().state()
    }

    pub fn clear(&self) -> Result<(), AssistantError> {
        self.lock().clear()
    }

    /// Cancels the running answer and rejects every further question.
    pub fn close(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    #[instrument(skip_all)]
    pub async fn ask<P: LlmProvider + ?Sized>(
        &self,
        provider: &P,
        question: &str,
        context: &AssistantContext,
    ) -> Result<ChatMessage, AssistantError> {
        if self.is_closed() {
            return Err(AssistantError::Cancelled);
        }
        let turn = self.lock().begin(question, context)?;

        let result = tokio::select! {
            () = self.token.cancelled() => Err(AssistantError::Cancelled),
            result = self.answer(provider, &turn) => result,
        };

        let mut session = self.lock();
        match result {
            Err(AssistantError::Cancelled) => {
                session.cancel(turn.id)?;
                Err(AssistantError::Cancelled)
            }
            result => session.settle(turn.id, result).cloned(),
        }
    }

    async fn answer<P: LlmProvider + ?Sized>(
        &self,
        provider: &P,
        turn: &PendingTurn,
    ) -> Result<Option<String>, AssistantError> {
        let reply: ProviderReply = provider
            .ask(&turn.request, turn.delivery)
            .await
            .map_err(AssistantError::Provider)?;
        read_reply(reply, turn.delivery, |chunk| self.lock().push_chunk(turn.id, chunk)).await
    }
}
