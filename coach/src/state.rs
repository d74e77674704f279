use serde::{Deserialize, Serialize};

use crate::analyzer::FrameAnalysis;
use crate::message::ChatMessage;
use crate::sampler::FrameSample;

/// What a session is busy with. Only one phase is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    ExtractingFrames,
    AnalyzingFrames,
    AwaitingReply,
}

impl SessionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionPhase::Idle)
    }
}

/// Transcript plus the frames and tips behind it.
///
/// Messages are append-only; their order is the order they were created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
    frames: Vec<FrameSample>,
    analyses: Vec<FrameAnalysis>,
    phase: SessionPhase,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn frames(&self) -> &[FrameSample] {
        &self.frames
    }

    pub fn analyses(&self) -> &[FrameAnalysis] {
        &self.analyses
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Covers both frame extraction and per-frame analysis
    pub fn is_analyzing(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::ExtractingFrames | SessionPhase::AnalyzingFrames
        )
    }

    pub fn is_extracting_frames(&self) -> bool {
        self.phase == SessionPhase::ExtractingFrames
    }

    pub fn is_sending_reply(&self) -> bool {
        self.phase == SessionPhase::AwaitingReply
    }

    /// True once the summary message has been appended. Nothing else can
    /// open the transcript: follow-ups are refused until then.
    pub fn is_seeded(&self) -> bool {
        !self.messages.is_empty()
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    pub(crate) fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub(crate) fn set_frames(&mut self, frames: Vec<FrameSample>) {
        self.frames = frames;
    }

    pub(crate) fn push_analysis(&mut self, analysis: FrameAnalysis) {
        self.analyses.push(analysis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_flags_follow_phase() {
        let mut state = ConversationState::new();
        assert!(state.phase().is_idle());
        assert!(!state.is_analyzing());

        state.set_phase(SessionPhase::ExtractingFrames);
        assert!(state.is_analyzing());
        assert!(state.is_extracting_frames());
        assert!(!state.is_sending_reply());

        state.set_phase(SessionPhase::AnalyzingFrames);
        assert!(state.is_analyzing());
        assert!(!state.is_extracting_frames());

        state.set_phase(SessionPhase::AwaitingReply);
        assert!(!state.is_analyzing());
        assert!(state.is_sending_reply());
    }

    #[test]
    fn test_messages_keep_insertion_order() {
        let mut state = ConversationState::new();
        assert!(!state.is_seeded());

        state.push_message(ChatMessage::assistant("report"));
        state.push_message(ChatMessage::user("question"));
        state.push_message(ChatMessage::assistant("answer"));

        let texts: Vec<&str> = state.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["report", "question", "answer"]);
        assert!(state.is_seeded());
    }
}
