// tests/capture_tests.rs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use claimdesk_core::capture::{CaptureEvent, CaptureSession, CapturedCode, CodeSource};
use claimdesk_core::models::VerificationMethod;
use claimdesk_core::Error;

/// A camera stand-in that plays back a fixed frame script, then blocks as if
/// pointed at nothing. Counts releases so tests can check the stream is
/// never leaked or double-closed.
struct ScriptedSource {
    frames: Vec<Option<String>>,
    fail_with: Option<String>,
    releases: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(frames: Vec<Option<String>>, releases: Arc<AtomicUsize>) -> Self {
        Self {
            frames,
            fail_with: None,
            releases,
        }
    }

    fn failing(reason: &str, releases: Arc<AtomicUsize>) -> Self {
        Self {
            frames: vec![],
            fail_with: Some(reason.to_string()),
            releases,
        }
    }
}

#[async_trait]
impl CodeSource for ScriptedSource {
    async fn next_attempt(&mut self) -> Result<Option<String>, Error> {
        if let Some(reason) = self.fail_with.take() {
            return Err(Error::Capture(reason));
        }
        if self.frames.is_empty() {
            std::future::pending::<()>().await;
        }
        Ok(self.frames.remove(0))
    }

    async fn release(&mut self) -> Result<(), Error> {
        self.releases.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn label(&self) -> &str {
        "scripted-camera"
    }
}

#[tokio::test]
async fn first_decode_stops_capture_and_releases_source() -> anyhow::Result<()> {
    let releases = Arc::new(AtomicUsize::new(0));
    let source = ScriptedSource::new(
        vec![
            None, // empty frame goes by first
            Some("https://example.com/verify/AQ51HP87?src=qr".to_string()),
            Some("SHOULD_NEVER_BE_REACHED".to_string()),
        ],
        releases.clone(),
    );

    let mut session = CaptureSession::start(Box::new(source));
    match session.next_event().await {
        Some(CaptureEvent::Decoded(code)) => {
            assert_eq!(code.text, "AQ51HP87");
            assert_eq!(code.method, VerificationMethod::QrCode);
        }
        other => panic!("expected a decoded event, got {other:?}"),
    }

    session.stop().await;
    assert_eq!(releases.load(Ordering::SeqCst), 1);
    assert!(!session.is_active());
    Ok(())
}

#[tokio::test]
async fn stop_is_idempotent_and_releases_exactly_once() -> anyhow::Result<()> {
    let releases = Arc::new(AtomicUsize::new(0));
    let source = ScriptedSource::new(vec![], releases.clone());

    let mut session = CaptureSession::start(Box::new(source));
    session.stop().await;
    session.stop().await;

    assert_eq!(releases.load(Ordering::SeqCst), 1);
    assert!(!session.is_active());
    Ok(())
}

#[tokio::test]
async fn decode_failure_emits_event_and_still_releases() -> anyhow::Result<()> {
    let releases = Arc::new(AtomicUsize::new(0));
    let source = ScriptedSource::failing("camera permission denied", releases.clone());

    let mut session = CaptureSession::start(Box::new(source));
    match session.next_event().await {
        Some(CaptureEvent::Failed { reason }) => {
            assert!(reason.contains("camera permission denied"));
        }
        other => panic!("expected a failure event, got {other:?}"),
    }

    session.stop().await;
    assert_eq!(releases.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn dropping_a_session_releases_the_source() -> anyhow::Result<()> {
    let releases = Arc::new(AtomicUsize::new(0));
    {
        let source = ScriptedSource::new(vec![], releases.clone());
        let _session = CaptureSession::start(Box::new(source));
        // dropped here without an explicit stop, e.g. modal closed abruptly
    }

    // Give the decode task a moment to observe the stop signal and wind down.
    for _ in 0..50 {
        if releases.load(Ordering::SeqCst) == 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(releases.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn typed_entry_is_normalized_and_rejects_empty() -> anyhow::Result<()> {
    let code = CapturedCode::typed("  aq51hp87 ")?;
    assert_eq!(code.text, "AQ51HP87");
    assert_eq!(code.method, VerificationMethod::ClaimId);

    assert!(matches!(
        CapturedCode::typed("   "),
        Err(Error::InvalidInput(_))
    ));
    Ok(())
}

/// Malformed typed input is rejected locally, before any verification call.
#[tokio::test]
async fn typed_entry_rejects_malformed_claim_ids() -> anyhow::Result<()> {
    assert!(matches!(
        CapturedCode::typed("SHORT"),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        CapturedCode::typed("has spaces in it"),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        CapturedCode::typed("dash-not-allowed"),
        Err(Error::InvalidInput(_))
    ));
    Ok(())
}
