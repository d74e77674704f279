//! Turns the per-frame tips into the first assistant message of a session.

use std::fmt::Write;

use tracing::warn;

use crate::analyzer::FrameAnalysis;
use crate::message::ChatMessage;

const REPORT_HEADER: &str = "🏌️‍♂️ **Swing Analysis Complete**\n\n\
I've analyzed key frames from your swing. Here's what I observed:\n\n";

const REPORT_CLOSING: &str = "**Overall Assessment:**\n\
Focus on the specific tips above for each phase. Practice these positions slowly to build muscle memory.\n\n\
**Next Steps:**\n\
• Practice the setup and takeaway positions first\n\
• Work on one phase at a time\n\
• Record more swings to track your progress\n\n\
Feel free to ask questions about any specific phase of your swing!";

/// General report shown when no frame could be analyzed
pub const FALLBACK_REPORT: &str = "🏌️‍♂️ **Swing Analysis**

I've analyzed your golf swing video. Here's my assessment:

**Setup Position**
Good athletic posture with balanced weight distribution. Try positioning the ball slightly more forward in your stance for better contact.

**Takeaway**
Nice wide takeaway with good extension. Keep this smooth tempo throughout your backswing.

**Backswing**
Good shoulder turn and arm position. Focus on maintaining your spine angle as you continue to the top.

**Downswing**
Solid transition here. Work on initiating the downswing with your lower body leading the way.

**Impact & Follow-Through**
Nice balanced finish. Continue rotating through impact for maximum power transfer.

**Overall Assessment:**
Your swing shows good fundamentals with room for improvement in timing and sequencing.

**Practice Drills:**
• Practice slow-motion swings focusing on maintaining your spine angle
• Work on lower body initiation drills for better sequence
• Practice impact position drills for more consistent contact

Note: Frame extraction failed, so this is a general analysis. Try recording a new video for detailed frame-by-frame feedback.";

/// Formats the frame-by-frame report. Analyses are listed in the order given.
pub fn build_report(analyses: &[FrameAnalysis]) -> String {
    let mut report = String::from(REPORT_HEADER);
    for analysis in analyses {
        // Writing into a String cannot fail
        let _ = write!(
            report,
            "**{}** ({}ms)\n{}\n\n",
            analysis.sample.phase.label(),
            analysis.sample.offset_ms,
            analysis.tip
        );
    }
    report.push_str(REPORT_CLOSING);
    report
}

/// Builds the session's first assistant message.
///
/// An empty input means nothing could be sampled, so the canned general
/// report is used instead of an empty frame-by-frame one.
pub fn summarize(analyses: &[FrameAnalysis]) -> ChatMessage {
    if analyses.is_empty() {
        warn!("No frame analyses available, using general report");
        return fallback_summary();
    }

    let mut ordered = analyses.to_vec();
    ordered.sort_by_key(|a| (a.sample.offset_ms, a.sequence_index));

    ChatMessage::assistant(build_report(&ordered))
}

pub fn fallback_summary() -> ChatMessage {
    ChatMessage::assistant(FALLBACK_REPORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ImageResource;
    use crate::sampler::FrameSample;

    fn analysis(offset_ms: u64, index: usize, tip: &str) -> FrameAnalysis {
        FrameAnalysis {
            sample: FrameSample::new(ImageResource::new(format!("f{offset_ms}.jpg")), offset_ms),
            tip: tip.to_string(),
            sequence_index: index,
        }
    }

    #[test]
    fn test_empty_input_uses_canned_report() {
        let message = summarize(&[]);
        assert!(!message.is_from_user);
        assert!(message.text.contains("Frame extraction failed"));
        assert!(message.text.contains("**Practice Drills:**"));
    }

    #[test]
    fn test_report_lists_phases_and_tips_in_offset_order() {
        let message = summarize(&[
            analysis(0, 0, "Widen your stance."),
            analysis(1000, 1, "Keep the clubface square."),
            analysis(3000, 2, "Lead with your hips."),
        ]);
        let text = &message.text;

        assert!(text.starts_with("🏌️‍♂️ **Swing Analysis Complete**"));
        assert!(!text.contains("Frame extraction failed"));

        let positions: Vec<usize> = [
            "**Setup/Address** (0ms)\nWiden your stance.",
            "**Takeaway** (1000ms)\nKeep the clubface square.",
            "**Impact** (3000ms)\nLead with your hips.",
            "**Overall Assessment:**",
            "Feel free to ask questions",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_out_of_order_input_is_reordered_by_offset() {
        let message = summarize(&[
            analysis(2500, 1, "Drop the club into the slot."),
            analysis(500, 0, "Set up tall."),
        ]);
        let first = message.text.find("Set up tall.").unwrap();
        let second = message.text.find("Drop the club into the slot.").unwrap();
        assert!(first < second);
    }
}
