/*!
 * Tests for the transport fallback chain
 */

use std::sync::atomic::Ordering;
use url::Url;

use capsync::app_config::CaptionMessages;
use capsync::caption_sync::{CaptionSync, DisplayState, SyncState};
use capsync::display::RecordingDisplay;
use capsync::errors::CaptionError;
use capsync::loader::CaptionLoader;
use capsync::transport::MockTransport;
use crate::common;

fn caption_url() -> Url {
    Url::parse("https://example.com/audio/captions.vtt").unwrap()
}

#[tokio::test]
async fn test_load_withWorkingPrimary_shouldNotTouchSecondary() {
    let primary = MockTransport::working(common::SAMPLE_VTT).named("primary");
    let secondary = MockTransport::working(common::SAMPLE_VTT).named("secondary");
    let secondary_calls = secondary.counter();

    let loader = CaptionLoader::new(vec![Box::new(primary), Box::new(secondary)]);
    let track = loader.load(&caption_url()).await.unwrap();

    assert_eq!(track.len(), 3);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_load_withFailingPrimary_shouldCallSecondaryOnce() {
    let primary = MockTransport::failing().named("primary");
    let secondary = MockTransport::local(common::SAMPLE_VTT).named("secondary");
    let primary_calls = primary.counter();
    let secondary_calls = secondary.counter();

    let loader = CaptionLoader::new(vec![Box::new(primary), Box::new(secondary)]);
    let track = loader.load(&caption_url()).await.unwrap();

    assert_eq!(track.len(), 3);
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_load_withNonSuccessStatus_shouldFallBack() {
    let primary = MockTransport::status(404).named("primary");
    let secondary = MockTransport::working(common::SAMPLE_VTT).named("secondary");
    let secondary_calls = secondary.counter();

    let loader = CaptionLoader::new(vec![Box::new(primary), Box::new(secondary)]);
    assert!(loader.load(&caption_url()).await.is_ok());
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_load_withStatusZeroOnPrimary_shouldNotCountAsSuccess() {
    let primary = MockTransport::status(0).named("primary");
    let secondary = MockTransport::status(0).accepting_local().named("secondary");

    let loader = CaptionLoader::new(vec![Box::new(primary), Box::new(secondary)]);
    let track = loader.load(&caption_url()).await.unwrap();

    // Accepted with an empty body
    assert!(track.is_empty());
}

#[tokio::test]
async fn test_load_withAllFailing_shouldListEveryAttempt() {
    let loader = CaptionLoader::new(vec![
        Box::new(MockTransport::failing().named("primary")),
        Box::new(MockTransport::status(500).named("secondary")),
    ]);

    match loader.load(&caption_url()).await {
        Err(CaptionError::Unavailable { attempts }) => {
            assert_eq!(attempts.len(), 2);
            assert!(attempts[0].starts_with("primary"));
            assert!(attempts[1].contains("500"));
        }
        other => panic!("expected Unavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_withoutTransports_shouldFail() {
    let loader = CaptionLoader::new(Vec::new());
    assert!(matches!(loader.load(&caption_url()).await, Err(CaptionError::NoTransports)));
}

#[tokio::test]
async fn test_initialize_withBothFailing_shouldShowFailureOnceAndNeverRetry() {
    let primary = MockTransport::failing();
    let secondary = MockTransport::failing().accepting_local();
    let primary_calls = primary.counter();
    let secondary_calls = secondary.counter();
    let loader = CaptionLoader::new(vec![Box::new(primary), Box::new(secondary)]);

    let mut sync = CaptionSync::new(RecordingDisplay::new(), CaptionMessages::default());
    let url = caption_url();
    assert_eq!(sync.initialize(&loader, Some(&url)).await, SyncState::LoadFailed);

    // Later notifications and a second initialize do not trigger another load
    sync.on_time_update(3.0, false);
    sync.on_play(0.0);
    assert_eq!(sync.initialize(&loader, Some(&url)).await, SyncState::LoadFailed);

    let unavailable = CaptionMessages::default().unavailable;
    assert_eq!(sync.display().count_of(&unavailable), 1);
    assert_eq!(sync.display().last(), Some((unavailable.as_str(), false)));
    assert_eq!(sync.display_state(), &DisplayState::Unavailable);
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_initialize_withWorkingChain_shouldShowLoadingThenReady() {
    let loader = CaptionLoader::new(vec![Box::new(MockTransport::working(common::SAMPLE_VTT))]);
    let mut sync = CaptionSync::new(RecordingDisplay::new(), CaptionMessages::default());

    let url = caption_url();
    assert_eq!(sync.initialize(&loader, Some(&url)).await, SyncState::Ready);

    let messages = CaptionMessages::default();
    let texts: Vec<&str> = sync.display().publications().iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(texts, vec![messages.loading.as_str(), messages.ready.as_str()]);
    assert_eq!(sync.track().map(|t| t.len()), Some(3));
}

#[tokio::test]
async fn test_initialize_withoutResource_shouldStayInert() {
    let primary = MockTransport::working(common::SAMPLE_VTT);
    let calls = primary.counter();
    let loader = CaptionLoader::new(vec![Box::new(primary)]);
    let mut sync = CaptionSync::new(RecordingDisplay::new(), CaptionMessages::default());

    assert_eq!(sync.initialize(&loader, None).await, SyncState::Uninitialized);
    sync.on_time_update(2.0, false);
    sync.on_ended();

    assert!(sync.display().is_untouched());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_defaultChain_shouldTryFetchThenLegacy() {
    let loader = CaptionLoader::with_default_chain(10);
    assert_eq!(loader.transport_names(), vec!["fetch", "legacy"]);
}
