use std::fmt::Write;

use swingcoach_core::TextGeneratorRef;
use tracing::{debug, error, info};

use crate::errors::{SessionError, SessionResult};
use crate::message::ChatMessage;
use crate::state::{ConversationState, SessionPhase};

/// Reply appended when the model cannot answer a follow-up
pub const UNAVAILABLE_NOTICE: &str =
    "This is a non-AI response - the AI service is currently unavailable.";

const FOLLOW_UP_PREAMBLE: &str = "You are a professional golf instructor who just analyzed someone's complete golf swing video. You provided comprehensive feedback about their swing phases, technique, and areas for improvement.

The golfer is asking a follow-up question about their swing. Provide concise, actionable advice using \"you\" to address them directly. Keep your response focused and practical.

Reference the swing analysis you just provided when relevant and give clear, simple explanations that build on your initial assessment.";

/// Builds the follow-up prompt.
///
/// With an empty `history` the model sees only the fixed preamble and the
/// question, so every call is stateless.
pub fn build_follow_up_prompt(question: &str, history: &[ChatMessage]) -> String {
    let mut prompt = String::from(FOLLOW_UP_PREAMBLE);

    if !history.is_empty() {
        prompt.push_str("\n\nEarlier in this conversation:\n");
        for message in history {
            let speaker = if message.is_from_user { "Golfer" } else { "Instructor" };
            let _ = writeln!(prompt, "{}: {}", speaker, message.text);
        }
    }

    let _ = write!(
        prompt,
        "\n\nQuestion: {}\n\nProvide a helpful, focused response:",
        question
    );
    prompt
}

/// A follow-up whose user message is already in the transcript
#[derive(Debug, Clone)]
pub struct PendingTurn {
    prompt: String,
}

impl PendingTurn {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Handles user turns: one outstanding reply per conversation at most.
#[derive(Debug, Clone)]
pub struct ConversationManager {
    generator: TextGeneratorRef,
    history_turns: usize,
}

impl ConversationManager {
    pub fn new(generator: TextGeneratorRef) -> Self {
        Self {
            generator,
            history_turns: 0,
        }
    }

    /// Quote the last `turns` transcript messages into each follow-up prompt
    pub fn with_history_turns(mut self, turns: usize) -> Self {
        self.history_turns = turns;
        self
    }

    /// Validates the input, appends the user message and marks the
    /// conversation as awaiting a reply. Follow-ups are only accepted once
    /// the analysis report opens the transcript.
    pub fn begin_turn(
        &self,
        state: &mut ConversationState,
        input: &str,
    ) -> SessionResult<PendingTurn> {
        if input.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        if !state.phase().is_idle() {
            debug!(phase = ?state.phase(), "Rejecting message while busy");
            return Err(SessionError::Busy(state.phase()));
        }
        if !state.is_seeded() {
            debug!("Rejecting message before the swing report");
            return Err(SessionError::NotAnalyzed);
        }

        let messages = state.messages();
        let history = &messages[messages.len().saturating_sub(self.history_turns)..];
        let prompt = build_follow_up_prompt(input, history);

        state.push_message(ChatMessage::user(input));
        state.set_phase(SessionPhase::AwaitingReply);
        Ok(PendingTurn { prompt })
    }

    /// Single attempt at the external service; failure becomes the notice
    pub async fn request_reply(&self, turn: &PendingTurn) -> ChatMessage {
        match self.generator.generate_text(turn.prompt()).await {
            Ok(text) => {
                info!(model = self.generator.model_name(), "Received follow-up reply");
                ChatMessage::assistant(text)
            }
            Err(e) => {
                error!(error = %e, "Error sending message");
                ChatMessage::assistant(UNAVAILABLE_NOTICE)
            }
        }
    }

    /// Appends the reply and frees the conversation for the next turn
    pub fn finish_turn(&self, state: &mut ConversationState, reply: ChatMessage) {
        state.push_message(reply);
        state.set_phase(SessionPhase::Idle);
    }

    /// All three steps in one go, for callers that own the state exclusively
    pub async fn handle_user_turn(
        &self,
        state: &mut ConversationState,
        input: &str,
    ) -> SessionResult<()> {
        let turn = self.begin_turn(state, input)?;
        let reply = self.request_reply(&turn).await;
        self.finish_turn(state, reply);
        Ok(())
    }
}
