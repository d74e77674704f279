mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{DiskExtractor, DownGenerator};
use swingcoach::{fallback_tip, CoachSession, SessionPhase, SwingPhase, VideoResource};
use swingcoach_core::CoachConfig;

fn config(offsets: Vec<u64>) -> CoachConfig {
    CoachConfig {
        frame_offsets_ms: Some(offsets),
        ..CoachConfig::default()
    }
}

#[tokio::test]
async fn frames_extracted_but_service_down_gives_fallback_tips() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Arc::new(DownGenerator::default());
    let session = CoachSession::new(
        &config(vec![0, 500, 1000]),
        generator.clone(),
        Arc::new(DiskExtractor::new(dir.path().to_path_buf())),
    );

    let summary = session
        .analyze_swing(&VideoResource::new("swing.mp4"))
        .await
        .unwrap();
    let text = &summary.text;

    // One model call per frame, no retries
    assert_eq!(generator.calls.load(Ordering::SeqCst), 3);

    let sections = [
        format!("**Setup/Address** (0ms)\n{}", fallback_tip(SwingPhase::SetupAddress)),
        format!("**Setup/Address** (500ms)\n{}", fallback_tip(SwingPhase::SetupAddress)),
        format!("**Takeaway** (1000ms)\n{}", fallback_tip(SwingPhase::Takeaway)),
    ];
    let mut last = 0;
    for section in &sections {
        let at = text[last..]
            .find(section.as_str())
            .unwrap_or_else(|| panic!("missing section {section:?}"));
        last += at + section.len();
    }

    assert!(text.contains("**Overall Assessment:**"));
    assert!(text.contains("**Next Steps:**"));
    assert!(!text.contains("Frame extraction failed"));

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.messages().len(), 1);
    let indices: Vec<usize> = snapshot.analyses().iter().map(|a| a.sequence_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(snapshot.phase(), SessionPhase::Idle);
}

#[tokio::test]
async fn no_frames_extracted_gives_canned_report() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Arc::new(DownGenerator::default());
    let extractor = Arc::new(DiskExtractor::broken(dir.path().to_path_buf()));
    let session = CoachSession::new(&config(vec![0, 500, 1000]), generator.clone(), extractor.clone());

    let summary = session
        .analyze_swing(&VideoResource::new("swing.mp4"))
        .await
        .unwrap();

    assert!(summary.text.contains("Frame extraction failed"));
    assert!(!summary.is_from_user);
    // Every offset was attempted even though each one failed
    assert_eq!(*extractor.calls.lock().unwrap(), vec![0, 500, 1000]);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    assert!(session.snapshot().await.frames().is_empty());
}

#[tokio::test]
async fn follow_up_with_service_down_appends_notice() {
    let dir = tempfile::tempdir().unwrap();
    let session = CoachSession::new(
        &config(vec![0]),
        Arc::new(DownGenerator::default()),
        Arc::new(DiskExtractor::new(dir.path().to_path_buf())),
    );
    session
        .analyze_swing(&VideoResource::new("swing.mp4"))
        .await
        .unwrap();

    let reply = session.send_message("What should I drill first?").await.unwrap();
    assert_eq!(reply.text, swingcoach::UNAVAILABLE_NOTICE);

    let snapshot = session.snapshot().await;
    let roles: Vec<bool> = snapshot.messages().iter().map(|m| m.is_from_user).collect();
    assert_eq!(roles, vec![false, true, false]);
}
