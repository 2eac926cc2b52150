/*!
 * Tests for active cue resolution and display updates
 */

use capsync::app_config::CaptionMessages;
use capsync::caption_sync::{CaptionSync, DisplayState, SyncState};
use capsync::caption_track::Cue;
use capsync::display::RecordingDisplay;
use capsync::playback::{PlaybackClock, PlaybackEvent};
use crate::common;

#[test]
fn test_resolve_withOverlappingCues_shouldPreferFirstInserted() {
    let sync = common::ready_sync(vec![Cue::new(0.0, 5.0, "A"), Cue::new(2.0, 7.0, "B")]);

    assert_eq!(sync.resolve_active_cue(3.0).map(|c| c.text.as_str()), Some("A"));
    assert_eq!(sync.resolve_active_cue(6.0).map(|c| c.text.as_str()), Some("B"));
}

#[test]
fn test_resolve_withLaterStartInsertedFirst_shouldStillPreferInsertionOrder() {
    let sync = common::ready_sync(vec![Cue::new(2.0, 7.0, "B"), Cue::new(0.0, 5.0, "A")]);

    assert_eq!(sync.resolve_active_cue(3.0).map(|c| c.text.as_str()), Some("B"));
}

#[test]
fn test_resolve_betweenCues_shouldReturnNone() {
    let sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "A"), Cue::new(5.0, 8.0, "B")]);

    assert!(sync.resolve_active_cue(4.0).is_none());
    assert!(sync.resolve_active_cue(0.5).is_none());
    assert!(sync.resolve_active_cue(8.5).is_none());
}

#[test]
fn test_resolve_atBoundaries_shouldBeInclusive() {
    let sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "A")]);

    assert!(sync.resolve_active_cue(1.0).is_some());
    assert!(sync.resolve_active_cue(3.0).is_some());
}

#[test]
fn test_resolve_withoutTrack_shouldReturnNone() {
    let sync = CaptionSync::new(RecordingDisplay::new(), CaptionMessages::default());
    assert!(sync.resolve_active_cue(1.0).is_none());
}

#[test]
fn test_timeUpdate_withActiveCue_shouldPublishActiveText() {
    let mut sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "Hello")]);
    sync.on_time_update(2.0, false);

    assert_eq!(sync.display().last(), Some(("Hello", true)));
    assert_eq!(sync.display_state(), &DisplayState::ShowingCue("Hello".to_string()));
}

#[test]
fn test_timeUpdate_betweenCuesWhilePlaying_shouldPublishPlaceholder() {
    let mut sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "A"), Cue::new(5.0, 8.0, "B")]);
    sync.on_time_update(4.0, false);

    assert_eq!(sync.display().last(), Some(("...", false)));
    assert_eq!(sync.display_state(), &DisplayState::Idle);
}

#[test]
fn test_timeUpdate_pausedAtZero_shouldLeaveDisplayUntouched() {
    let mut sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "A")]);
    sync.on_time_update(0.0, true);
    sync.on_time_update(0.0, false);

    assert!(sync.display().is_untouched());
    assert_eq!(sync.display_state(), &DisplayState::Untouched);
}

#[test]
fn test_timeUpdate_pausedBetweenCues_shouldLeaveDisplayUntouched() {
    let mut sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "A")]);
    sync.on_time_update(2.0, false);
    sync.on_time_update(4.0, true);

    assert_eq!(sync.display().publications().len(), 1);
    assert_eq!(sync.display().last(), Some(("A", true)));
}

#[test]
fn test_timeUpdate_pausedInsideCue_shouldStillShowCue() {
    let mut sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "A")]);
    sync.on_time_update(2.0, true);

    assert_eq!(sync.display().last(), Some(("A", true)));
}

#[test]
fn test_timeUpdate_repeatedSameTime_shouldResolveIdentically() {
    let mut sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "A"), Cue::new(5.0, 8.0, "B")]);

    for _ in 0..5 {
        sync.on_time_update(6.0, false);
    }
    for _ in 0..5 {
        sync.on_time_update(4.0, false);
    }

    let publications = sync.display().publications();
    assert_eq!(publications.len(), 10);
    assert!(publications[..5].iter().all(|(text, active)| text == "B" && *active));
    assert!(publications[5..].iter().all(|(text, active)| text == "..." && !*active));
}

#[test]
fn test_handleEvent_shouldDispatchToHooks() {
    let mut sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "A")]);

    sync.handle_event(PlaybackEvent::Play(PlaybackClock::playing(0.0)));
    sync.handle_event(PlaybackEvent::TimeUpdate(PlaybackClock::playing(1.5)));
    sync.handle_event(PlaybackEvent::Pause(PlaybackClock::paused(1.5)));
    sync.handle_event(PlaybackEvent::Ended);

    let texts: Vec<&str> = sync.display().publications().iter().map(|(t, _)| t.as_str()).collect();
    let ready = CaptionMessages::default().ready;
    assert_eq!(texts, vec!["...", "A", ready.as_str()]);
}

#[test]
fn test_teardown_shouldReturnDisplay() {
    let mut sync = common::ready_sync(vec![Cue::new(1.0, 3.0, "A")]);
    assert_eq!(sync.state(), SyncState::Ready);
    sync.on_time_update(2.0, false);

    let display = sync.teardown();
    assert_eq!(display.count_of("A"), 1);
}

#[test]
fn test_customMessages_shouldBeUsedForPlaceholder() {
    let messages = CaptionMessages {
        placeholder: "(music)".to_string(),
        ..CaptionMessages::default()
    };
    let mut sync = CaptionSync::with_track(
        RecordingDisplay::new(),
        messages,
        capsync::CaptionTrack::from_cues(vec![Cue::new(1.0, 2.0, "A")]),
    );
    sync.on_time_update(5.0, false);

    assert_eq!(sync.display().last(), Some(("(music)", false)));
}
