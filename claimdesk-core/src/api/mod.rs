// File: claimdesk-core/src/api/mod.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use claimdesk_common::models::{
    HistoryPage, RedemptionDetails, RedemptionStats, VerificationMethod, VerifiedClaim,
};
use claimdesk_common::Error;

pub mod client;
pub mod messages;
pub mod wire;

pub use messages::{ErrorCode, OperatorError};

/// Result of asking the backend whether a claim can be redeemed.
///
/// The backend is the only authority here; an `Invalid` reason is surfaced
/// verbatim, never guessed locally.
#[derive(Debug, Clone)]
pub enum VerificationOutcome {
    Valid(VerifiedClaim),
    Invalid {
        message: String,
        code: Option<ErrorCode>,
    },
}

/// Result of the completion call, the single state-mutating operation in the
/// whole workflow.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    Completed(RedemptionDetails),
    Rejected {
        message: String,
        code: Option<ErrorCode>,
    },
}

/// Query parameters for the redemption history endpoint.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub page: u32,
    pub limit: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub offer_id: Option<Uuid>,
    pub redeemed_only: bool,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            start_date: None,
            end_date: None,
            offer_id: None,
            redeemed_only: true,
        }
    }
}

/// The marketplace redemption endpoints, as one mockable seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedemptionApi: Send + Sync {
    /// `POST business/redeem/verify`
    async fn verify_claim(
        &self,
        identifier: &str,
        method: VerificationMethod,
    ) -> Result<VerificationOutcome, Error>;

    /// `POST business/redeem/complete`. `notes` may be empty; the backend
    /// substitutes its own default wording in that case.
    async fn complete_redemption(
        &self,
        claim_id: &str,
        notes: &str,
    ) -> Result<CompletionOutcome, Error>;

    /// `GET business/redeem/history`
    async fn redemption_history(&self, query: &HistoryQuery) -> Result<HistoryPage, Error>;

    /// `GET business/redeem/stats`
    async fn redemption_stats(&self, days: u32) -> Result<RedemptionStats, Error>;
}
