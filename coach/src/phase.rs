use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Stage of a golf swing, assigned purely from the time offset of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwingPhase {
    SetupAddress,
    Takeaway,
    Backswing,
    TopOfBackswing,
    Downswing,
    Impact,
    FollowThrough,
}

impl SwingPhase {
    /// Step function over fixed breakpoints; each bound is inclusive.
    pub fn from_offset_ms(offset_ms: u64) -> Self {
        match offset_ms {
            0..=500 => SwingPhase::SetupAddress,
            501..=1000 => SwingPhase::Takeaway,
            1001..=1500 => SwingPhase::Backswing,
            1501..=2000 => SwingPhase::TopOfBackswing,
            2001..=2500 => SwingPhase::Downswing,
            2501..=3000 => SwingPhase::Impact,
            _ => SwingPhase::FollowThrough,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SwingPhase::SetupAddress => "Setup/Address",
            SwingPhase::Takeaway => "Takeaway",
            SwingPhase::Backswing => "Backswing",
            SwingPhase::TopOfBackswing => "Top of Backswing",
            SwingPhase::Downswing => "Downswing",
            SwingPhase::Impact => "Impact",
            SwingPhase::FollowThrough => "Follow-Through",
        }
    }
}

impl Display for SwingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_sample_offsets() {
        assert_eq!(SwingPhase::from_offset_ms(300).label(), "Setup/Address");
        assert_eq!(SwingPhase::from_offset_ms(750).label(), "Takeaway");
        assert_eq!(SwingPhase::from_offset_ms(1999).label(), "Top of Backswing");
        assert_eq!(SwingPhase::from_offset_ms(2600).label(), "Impact");
        assert_eq!(SwingPhase::from_offset_ms(5000).label(), "Follow-Through");
    }

    #[test]
    fn test_breakpoints_are_inclusive() {
        let expected = [
            (0, SwingPhase::SetupAddress),
            (500, SwingPhase::SetupAddress),
            (501, SwingPhase::Takeaway),
            (1000, SwingPhase::Takeaway),
            (1500, SwingPhase::Backswing),
            (2000, SwingPhase::TopOfBackswing),
            (2500, SwingPhase::Downswing),
            (3000, SwingPhase::Impact),
            (3001, SwingPhase::FollowThrough),
        ];
        for (offset, phase) in expected {
            assert_eq!(SwingPhase::from_offset_ms(offset), phase, "offset {offset}");
        }
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(SwingPhase::TopOfBackswing.to_string(), "Top of Backswing");
    }
}
