//! One coaching session: a single video, its analysis and the chat that follows.
//!
//! The session is the only writer of its [`ConversationState`]. Work runs
//! strictly in sequence (extract every frame, then analyze frames one by
//! one, then summarize) and follow-up questions are single-flight.

use swingcoach_core::{CoachConfig, TextGeneratorRef};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analyzer::FrameAnalyzer;
use crate::conversation::ConversationManager;
use crate::errors::{SessionError, SessionResult};
use crate::media::VideoResource;
use crate::message::ChatMessage;
use crate::sampler::{FrameExtractorRef, FrameSampler};
use crate::state::{ConversationState, SessionPhase};
use crate::summarizer::{fallback_summary, summarize};

#[derive(Debug)]
pub struct CoachSession {
    id: Uuid,
    offsets: Vec<u64>,
    sampler: FrameSampler,
    analyzer: FrameAnalyzer,
    conversation: ConversationManager,
    state: Mutex<ConversationState>,
}

impl CoachSession {
    pub fn new(
        config: &CoachConfig,
        generator: TextGeneratorRef,
        extractor: FrameExtractorRef,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            offsets: config.frame_offsets(),
            sampler: FrameSampler::new(extractor, config.frame_quality()),
            analyzer: FrameAnalyzer::new(generator.clone()),
            conversation: ConversationManager::new(generator)
                .with_history_turns(config.history_turns()),
            state: Mutex::new(ConversationState::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Runs the full analysis pass and seeds the transcript with its report.
    ///
    /// Never fails because of the video or the model; those fall back to
    /// canned text. Errors only signal that the session is busy or has
    /// already been seeded.
    pub async fn analyze_swing(&self, video: &VideoResource) -> SessionResult<ChatMessage> {
        {
            let mut state = self.state.lock().await;
            if !state.phase().is_idle() {
                return Err(SessionError::Busy(state.phase()));
            }
            if state.is_seeded() {
                return Err(SessionError::AlreadyAnalyzed);
            }
            state.set_phase(SessionPhase::ExtractingFrames);
        }
        info!(session = %self.id, video = %video, "Starting swing analysis");

        let frames = self.sampler.sample(video, &self.offsets).await;
        {
            let mut state = self.state.lock().await;
            state.set_frames(frames.clone());
            state.set_phase(SessionPhase::AnalyzingFrames);
        }

        let summary = if frames.is_empty() {
            warn!(session = %self.id, "No frames could be extracted from the video");
            fallback_summary()
        } else {
            let mut analyses = Vec::with_capacity(frames.len());
            for (index, sample) in frames.into_iter().enumerate() {
                let analysis = self.analyzer.analyze_sample(sample, index).await;
                self.state.lock().await.push_analysis(analysis.clone());
                analyses.push(analysis);
            }
            summarize(&analyses)
        };

        let mut state = self.state.lock().await;
        state.push_message(summary.clone());
        state.set_phase(SessionPhase::Idle);
        info!(session = %self.id, analyses = state.analyses().len(), "Swing analysis complete");
        Ok(summary)
    }

    /// Sends a follow-up question and returns the assistant reply.
    ///
    /// The user message is in the transcript before the service is called.
    /// A second question while one is pending is rejected, not queued.
    pub async fn send_message(&self, input: &str) -> SessionResult<ChatMessage> {
        let turn = {
            let mut state = self.state.lock().await;
            self.conversation.begin_turn(&mut state, input)?
        };

        let reply = self.conversation.request_reply(&turn).await;

        let mut state = self.state.lock().await;
        self.conversation.finish_turn(&mut state, reply.clone());
        Ok(reply)
    }

    /// Point-in-time copy of the transcript, frames and phase
    pub async fn snapshot(&self) -> ConversationState {
        self.state.lock().await.clone()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.state.lock().await.phase()
    }
}
