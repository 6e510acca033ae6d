// File: claimdesk-core/src/capture/mod.rs
//
// Input acquisition for the redemption workflow. A `CaptureSession` owns one
// exclusive code source (camera + decoder live behind the `CodeSource` seam)
// and runs a decode loop on a background task until the first successful
// decode, a decode failure, or an explicit stop. The source is released on
// every one of those paths. Sessions are one-shot: switching cameras means
// stopping this session and starting a fresh one with the new source, so the
// old stream is fully released before the new one is acquired.

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use claimdesk_common::models::VerificationMethod;
use claimdesk_common::Error;

pub mod extract;

/// A candidate claim identifier plus how the operator produced it.
#[derive(Debug, Clone)]
pub struct CapturedCode {
    pub text: String,
    pub method: VerificationMethod,
}

impl CapturedCode {
    /// Operator-typed entry. Normalized and format-checked here; input that
    /// cannot be a claim id never leaves the device.
    pub fn typed(text: &str) -> Result<Self, Error> {
        let text = extract::normalize_manual_code(text)?;
        if !extract::is_valid_claim_id(&text) {
            return Err(Error::InvalidInput(format!(
                "'{text}' is not a valid claim ID (expected 6-20 letters and digits)"
            )));
        }
        Ok(Self {
            text,
            method: VerificationMethod::ClaimId,
        })
    }

    fn scanned(raw: &str) -> Self {
        Self {
            text: extract::extract_claim_id(raw),
            method: VerificationMethod::QrCode,
        }
    }
}

/// A stream of decode attempts from some code-bearing device. The real
/// camera and QR decoder are external; implementations adapt them to this
/// seam.
#[async_trait]
pub trait CodeSource: Send + 'static {
    /// Wait for the next decode attempt. `Ok(None)` means a frame went by
    /// with nothing recognizable in it.
    async fn next_attempt(&mut self) -> Result<Option<String>, Error>;

    /// Release the underlying device. Called exactly once by the session,
    /// after the decode loop exits, whatever the exit path was.
    async fn release(&mut self) -> Result<(), Error>;

    /// Device label for logs.
    fn label(&self) -> &str;
}

/// What the decode loop reports back.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    Decoded(CapturedCode),
    Failed { reason: String },
}

/// One exclusive capture over one source. Not restartable: once stopped or
/// decoded, start a new session.
pub struct CaptureSession {
    events: UnboundedReceiver<CaptureEvent>,
    stop_tx: watch::Sender<bool>,
    decode_task: Option<JoinHandle<()>>,
}

impl CaptureSession {
    /// Take ownership of the source and start decoding on a background task.
    pub fn start(mut source: Box<dyn CodeSource>) -> Self {
        let (tx_evt, rx_evt) = mpsc::unbounded_channel::<CaptureEvent>();
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            debug!("[capture] decode loop started for {}", source.label());
            loop {
                tokio::select! {
                    // A dropped sender counts as a stop as well.
                    _ = stop_rx.changed() => break,
                    attempt = source.next_attempt() => match attempt {
                        Ok(Some(raw)) => {
                            let _ = tx_evt.send(CaptureEvent::Decoded(CapturedCode::scanned(&raw)));
                            break;
                        }
                        Ok(None) => continue,
                        Err(e) => {
                            let _ = tx_evt.send(CaptureEvent::Failed { reason: e.to_string() });
                            break;
                        }
                    }
                }
            }
            if let Err(e) = source.release().await {
                warn!("[capture] releasing {} failed: {e}", source.label());
            }
            debug!("[capture] decode loop ended for {}", source.label());
        });

        Self {
            events: rx_evt,
            stop_tx,
            decode_task: Some(handle),
        }
    }

    /// Next capture event, or `None` once the loop has ended and everything
    /// it emitted has been consumed.
    pub async fn next_event(&mut self) -> Option<CaptureEvent> {
        self.events.recv().await
    }

    /// Stop decoding and wait for the source to be released. Safe to call
    /// any number of times.
    pub async fn stop(&mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(handle) = self.decode_task.take() {
            if let Err(e) = handle.await {
                warn!("[capture] decode task join failed: {e}");
            }
        }
    }

    /// Whether the decode loop is still running.
    pub fn is_active(&self) -> bool {
        self.decode_task
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        // Signal only; the task owns the source and releases it on exit.
        let _ = self.stop_tx.send(true);
    }
}
