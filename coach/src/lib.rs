//! Swing coaching pipeline: sample frames from a swing video at fixed
//! offsets, ask the model for one tip per frame, fold the tips into a
//! report and answer follow-up questions about it.

pub mod analyzer;
pub mod conversation;
pub mod errors;
pub mod ffmpeg;
pub mod media;
pub mod message;
pub mod phase;
pub mod sampler;
pub mod session;
pub mod state;
pub mod summarizer;

pub use analyzer::{fallback_tip, FrameAnalysis, FrameAnalyzer};
pub use conversation::{ConversationManager, PendingTurn, UNAVAILABLE_NOTICE};
pub use errors::{SessionError, SessionResult};
pub use ffmpeg::FfmpegFrameExtractor;
pub use media::{ImageResource, VideoResource};
pub use message::ChatMessage;
pub use phase::SwingPhase;
pub use sampler::{FrameError, FrameExtractor, FrameExtractorRef, FrameSample, FrameSampler};
pub use session::CoachSession;
pub use state::{ConversationState, SessionPhase};
pub use summarizer::{summarize, FALLBACK_REPORT};
