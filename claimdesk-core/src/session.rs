// File: claimdesk-core/src/session.rs
//
// The redemption workflow for one operator device: verify a captured claim,
// show it, complete it on confirmation. One enum holds the whole workflow
// state, so combinations like "completing with no verified claim" cannot be
// represented. The backend stays the sole authority on claim state; this
// machine only decides which calls are allowed to leave the device.

use std::sync::Arc;

use tracing::{info, warn};

use claimdesk_common::models::{RedemptionDetails, VerifiedClaim};
use claimdesk_common::Error;

use crate::api::{CompletionOutcome, OperatorError, RedemptionApi, VerificationOutcome};
use crate::capture::CapturedCode;

/// Workflow phase for a single redemption attempt.
#[derive(Debug, Clone)]
pub enum SessionPhase {
    Idle,
    Verifying,
    Verified(VerifiedClaim),
    Completing(VerifiedClaim),
    Completed(RedemptionDetails),
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Verifying => "verifying",
            SessionPhase::Verified(_) => "verified",
            SessionPhase::Completing(_) => "completing",
            SessionPhase::Completed(_) => "completed",
        }
    }
}

/// One operator's redemption workflow instance.
pub struct RedemptionSession {
    api: Arc<dyn RedemptionApi>,
    phase: SessionPhase,
    last_error: Option<OperatorError>,
}

impl RedemptionSession {
    pub fn new(api: Arc<dyn RedemptionApi>) -> Self {
        Self {
            api,
            phase: SessionPhase::Idle,
            last_error: None,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// The error from the most recent failed step, for display. Cleared by
    /// the next verify/complete attempt and by `reset`.
    pub fn last_error(&self) -> Option<&OperatorError> {
        self.last_error.as_ref()
    }

    /// A call is outstanding; submission controls should be disabled.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Verifying | SessionPhase::Completing(_)
        )
    }

    /// Verify a captured claim identifier. Allowed from any settled phase; a
    /// new verification supersedes whatever was verified before. Inspect
    /// `phase()` and `last_error()` afterwards for the outcome.
    pub async fn verify(&mut self, code: &CapturedCode) -> Result<(), Error> {
        if self.is_busy() {
            return Err(Error::InvalidTransition(format!(
                "cannot verify while {}",
                self.phase.name()
            )));
        }
        self.last_error = None;
        self.phase = SessionPhase::Verifying;

        match self.api.verify_claim(&code.text, code.method).await {
            Ok(VerificationOutcome::Valid(claim)) => {
                info!("Claim {} verified, pending confirmation", claim.claim_id);
                self.phase = SessionPhase::Verified(claim);
            }
            Ok(VerificationOutcome::Invalid { message, code }) => {
                self.phase = SessionPhase::Idle;
                self.last_error = Some(OperatorError::from_backend(message, code));
            }
            Err(e) => {
                self.phase = SessionPhase::Idle;
                self.last_error = Some(OperatorError::from_transport(&e));
                return Err(e);
            }
        }
        Ok(())
    }

    /// Complete the redemption of the currently verified claim. Only legal
    /// in `Verified`; in particular a second completion after `Completed`
    /// is rejected here, before any network call, and requires a fresh
    /// verification.
    pub async fn complete(&mut self, notes: Option<&str>) -> Result<(), Error> {
        let claim = match &self.phase {
            SessionPhase::Verified(claim) => claim.clone(),
            SessionPhase::Completed(_) => {
                return Err(Error::InvalidTransition(
                    "claim already redeemed in this session; verify a new claim first".to_string(),
                ));
            }
            other => {
                return Err(Error::InvalidTransition(format!(
                    "redemption requires a verified claim (currently {})",
                    other.name()
                )));
            }
        };

        self.last_error = None;
        self.phase = SessionPhase::Completing(claim.clone());

        match self
            .api
            .complete_redemption(&claim.claim_id, notes.unwrap_or(""))
            .await
        {
            Ok(CompletionOutcome::Completed(details)) => {
                info!("Claim {} redeemed", details.claim_id);
                self.phase = SessionPhase::Completed(details);
            }
            Ok(CompletionOutcome::Rejected { message, code }) => {
                let err = OperatorError::from_backend(message, code);
                if err.recoverable {
                    // Operator may retry without re-scanning.
                    self.phase = SessionPhase::Verified(claim);
                } else {
                    // The claim is gone (redeemed elsewhere, expired, not
                    // ours); force a full restart of the workflow.
                    warn!(
                        "Claim {} no longer redeemable: {}",
                        claim.claim_id, err.message
                    );
                    self.phase = SessionPhase::Idle;
                }
                self.last_error = Some(err);
            }
            Err(e) => {
                // Transport failure: the verified claim is kept so the
                // operator can retry. Never retried automatically.
                self.phase = SessionPhase::Verified(claim);
                self.last_error = Some(OperatorError::from_transport(&e));
                return Err(e);
            }
        }
        Ok(())
    }

    /// Manual return to `Idle`, e.g. after a completed redemption or a dead
    /// end. Drops any verified claim and clears the displayed error.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.last_error = None;
    }
}
