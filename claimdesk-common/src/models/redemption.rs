// File: claimdesk-common/src/models/redemption.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::claim::{ClaimType, CustomerInfo};
use crate::models::offer::DiscountKind;

/// Confirmation bundle returned once the backend has marked a claim redeemed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedemptionDetails {
    pub claim_id: String,
    pub redeemed_at: DateTime<Utc>,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub offer_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redemption_notes: Option<String>,
}

/// Offer fields the history endpoint inlines per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryOffer {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub discount_type: DiscountKind,
    pub discount_value: f64,
    /// Savings the backend computed for this record. Display-only.
    pub savings_amount: f64,
}

/// One row of the business's redemption history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedemptionRecord {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<String>,
    pub claim_type: ClaimType,
    pub customer: CustomerInfo,
    pub offer: HistoryOffer,
    pub claimed_at: DateTime<Utc>,
    pub is_redeemed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeemed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redemption_notes: Option<String>,
}

/// Pagination metadata as the backend reports it.
///
/// `has_next`/`has_prev` are optional because older deployments omit them;
/// the accessors below fall back to the page arithmetic in that case, but the
/// backend flags always win when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
}

impl PageInfo {
    pub fn next_available(&self) -> bool {
        self.has_next.unwrap_or(self.page < self.total_pages)
    }

    pub fn prev_available(&self) -> bool {
        self.has_prev.unwrap_or(self.page > 1)
    }
}

/// Summary block accompanying a history page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total_claims: u64,
    pub redeemed_claims: u64,
    pub pending_claims: u64,
    pub total_savings_provided: f64,
    pub redemption_rate: f64,
}

/// One page of redemption history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPage {
    pub redemptions: Vec<RedemptionRecord>,
    pub pagination: PageInfo,
    pub summary: HistorySummary,
}

/// Claims vs. redemptions for a single day, oldest first in the breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub claims: u64,
    pub redemptions: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimTypeCounts {
    #[serde(default)]
    pub in_store: u64,
    #[serde(default)]
    pub online: u64,
}

/// Rolling redemption statistics for the business dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedemptionStats {
    pub period_days: u32,
    pub total_claims: u64,
    pub total_redemptions: u64,
    pub pending_redemptions: u64,
    pub redemption_rate: f64,
    pub total_savings_provided: f64,
    #[serde(default)]
    pub daily_breakdown: Vec<DailyCount>,
    #[serde(default)]
    pub claim_types: ClaimTypeCounts,
}
