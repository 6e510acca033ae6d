// File: claimdesk-common/src/models/claim.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a claim is meant to be fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    InStore,
    Online,
}

impl ClaimType {
    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::InStore => "In-Store",
            ClaimType::Online => "Online",
        }
    }
}

/// How the operator produced the claim identifier. Sent to the backend as
/// `verification_type` so it can decide whether to unwrap QR payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    QrCode,
    ClaimId,
    ManualEntry,
}

/// The customer who holds the claim, as returned by the verification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// The offer the claim was taken against. Validity window and claim caps are
/// enforced server-side and are not echoed back here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferSummary {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

/// A claim the backend has verified as redeemable. Everything in here is a
/// read-only view; the only way it changes state is the completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedClaim {
    pub id: Uuid,
    /// Opaque operator-facing identifier, the thing printed under the QR code.
    pub claim_id: String,
    pub claim_type: ClaimType,
    pub claimed_at: DateTime<Utc>,
    pub customer: CustomerInfo,
    pub offer: OfferSummary,
    pub discount_info: crate::models::offer::DiscountInfo,
}
