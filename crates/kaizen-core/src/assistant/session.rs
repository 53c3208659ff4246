use crate::assistant::context::AssistantContext;
use crate::assistant::error::AssistantError;
use crate::assistant::{FAILURE_MESSAGE, LlmProvider, ProviderReply, StreamEvent};
use futures::StreamExt;
use kaizen_config::assistant::{AssistantConfig, DeliveryMode};
use kaizen_model::assistant::AssistantRequest;
use kaizen_model::chat::{ChatMessage, MessagePhase};
use std::error::Error;
use tracing::instrument;
use uuid::Uuid;

/// Identifies one question/answer exchange. Equal to the id of the user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantState {
    Idle,
    Waiting(TurnId),
}

#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub id: TurnId,
    pub request: AssistantRequest,
    pub delivery: DeliveryMode,
}

/// Transcript and turn state of one assistant conversation.
///
/// A turn is started with [`begin`](Self::begin) and settled exactly once by
/// [`complete`](Self::complete), [`fail`](Self::fail) or [`cancel`](Self::cancel).
/// While a turn is open no other question is accepted.
#[derive(Debug)]
pub struct AssistantSession {
    delivery: DeliveryMode,
    max_excerpt_chars: usize,
    transcript: Vec<ChatMessage>,
    state: AssistantState,
    placeholder: Option<Uuid>,
}

impl AssistantSession {
    #[must_use]
    pub fn new(delivery: DeliveryMode, max_excerpt_chars: usize) -> Self {
        Self {
            delivery,
            max_excerpt_chars,
            transcript: Vec::new(),
            state: AssistantState::Idle,
            placeholder: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(config.delivery, config.max_excerpt_chars)
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    #[must_use]
    pub fn state(&self) -> AssistantState {
        self.state
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool {
        matches!(self.state, AssistantState::Waiting(_))
    }

    #[must_use]
    pub fn delivery(&self) -> DeliveryMode {
        self.delivery
    }

    fn check_turn(&self, turn: TurnId) -> Result<(), AssistantError> {
        match self.state {
            AssistantState::Waiting(current) if current == turn => Ok(()),
            _ => Err(AssistantError::NotWaiting),
        }
    }

    fn placeholder_index(&self) -> Option<usize> {
        let id = self.placeholder?;
        self.transcript.iter().position(|message| message.id == id)
    }

    fn remove_placeholder(&mut self) {
        if let Some(index) = self.placeholder_index() {
            self.transcript.remove(index);
        }
        self.placeholder = None;
    }

    /// Appends the user message (and a pending answer when streaming) and opens a turn.
    pub fn begin(&mut self, question: &str, context: &AssistantContext) -> Result<PendingTurn, AssistantError> {
        if self.is_waiting() {
            return Err(AssistantError::Busy);
        }
        if question.trim().is_empty() {
            return Err(AssistantError::EmptyQuestion);
        }

        let request = context.request(question, self.max_excerpt_chars);
        let message = ChatMessage::user(request.question.clone());
        let id = TurnId(message.id);
        self.transcript.push(message);

        if self.delivery == DeliveryMode::Streaming {
            let placeholder = ChatMessage::pending_assistant();
            self.placeholder = Some(placeholder.id);
            self.transcript.push(placeholder);
        }

        self.state = AssistantState::Waiting(id);
        Ok(PendingTurn {
            id,
            request,
            delivery: self.delivery,
        })
    }

    /// Extends the pending answer of a streaming turn.
    pub fn push_chunk(&mut self, turn: TurnId, chunk: &str) -> Result<(), AssistantError> {
        self.check_turn(turn)?;
        let index = self.placeholder_index().ok_or(AssistantError::NotWaiting)?;
        self.transcript[index].content.push_str(chunk);
        Ok(())
    }

    fn complete_index(&mut self, turn: TurnId, answer: Option<String>) -> Result<usize, AssistantError> {
        self.check_turn(turn)?;
        let empty = match (&answer, self.placeholder_index()) {
            (Some(answer), _) => answer.trim().is_empty(),
            (None, Some(index)) => self.transcript[index].content.trim().is_empty(),
            (None, None) => true,
        };
        if empty {
            return Err(AssistantError::EmptyAnswer);
        }

        let index = if let Some(index) = self.placeholder_index() {
            let message = &mut self.transcript[index];
            if let Some(answer) = answer {
                message.content = answer;
            }
            message.phase = MessagePhase::Final;
            index
        } else {
            self.transcript.push(ChatMessage::assistant(answer.unwrap_or_default()));
            self.transcript.len() - 1
        };

        self.placeholder = None;
        self.state = AssistantState::Idle;
        Ok(index)
    }

    /// Finalises the turn. `answer` replaces streamed content; `None` keeps what was streamed.
    pub fn complete(&mut self, turn: TurnId, answer: Option<String>) -> Result<&ChatMessage, AssistantError> {
        let index = self.complete_index(turn, answer)?;
        Ok(&self.transcript[index])
    }

    /// Drops the pending answer and appends a single error message instead.
    pub fn fail(&mut self, turn: TurnId, error: &AssistantError) -> Result<&ChatMessage, AssistantError> {
        self.check_turn(turn)?;
        tracing::warn!(error = error as &dyn Error, "assistant turn failed");
        self.remove_placeholder();
        self.transcript.push(ChatMessage::error(FAILURE_MESSAGE));
        self.state = AssistantState::Idle;
        Ok(&self.transcript[self.transcript.len() - 1])
    }

    /// Abandons the turn without an answer or error message.
    pub fn cancel(&mut self, turn: TurnId) -> Result<(), AssistantError> {
        self.check_turn(turn)?;
        tracing::debug!("assistant turn cancelled");
        self.remove_placeholder();
        self.state = AssistantState::Idle;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), AssistantError> {
        if self.is_waiting() {
            return Err(AssistantError::Busy);
        }
        self.transcript.clear();
        Ok(())
    }

    pub(crate) fn settle(
        &mut self,
        turn: TurnId,
        result: Result<Option<String>, AssistantError>,
    ) -> Result<&ChatMessage, AssistantError> {
        let error = match result.and_then(|answer| self.complete_index(turn, answer)) {
            Ok(index) => return Ok(&self.transcript[index]),
            Err(error) => error,
        };
        self.fail(turn, &error)?;
        Err(error)
    }

    /// Asks `provider` and records the answer. Provider failures are recorded as an error
    /// message and also returned.
    #[instrument(skip_all)]
    pub async fn ask<P: LlmProvider + ?Sized>(
        &mut self,
        provider: &P,
        question: &str,
        context: &AssistantContext,
    ) -> Result<&ChatMessage, AssistantError> {
        let turn = self.begin(question, context)?;
        let result = match provider.ask(&turn.request, turn.delivery).await {
            Ok(reply) => read_reply(reply, turn.delivery, |chunk| self.push_chunk(turn.id, chunk)).await,
            Err(error) => Err(AssistantError::Provider(error)),
        };
        self.settle(turn.id, result)
    }
}

/// Reads a provider reply to its end. Streamed chunks go to `on_chunk` when delivering
/// incrementally and are collected into the returned answer otherwise.
pub(crate) async fn read_reply<F>(
    reply: ProviderReply,
    delivery: DeliveryMode,
    mut on_chunk: F,
) -> Result<Option<String>, AssistantError>
where
    F: FnMut(&str) -> Result<(), AssistantError>,
{
    let mut stream = match reply {
        ProviderReply::Answer(answer) => return Ok(Some(answer)),
        ProviderReply::Stream(stream) => stream,
    };

    let mut collected = (delivery == DeliveryMode::Complete).then(String::new);
    while let Some(event) = stream.next().await {
        match event.map_err(AssistantError::Provider)? {
            StreamEvent::Chunk(chunk) => match collected.as_mut() {
                Some(buffer) => buffer.push_str(&chunk),
                None => on_chunk(&chunk)?,
            },
            StreamEvent::Done => return Ok(collected),
        }
    }
    Err(AssistantError::IncompleteStream)
}
