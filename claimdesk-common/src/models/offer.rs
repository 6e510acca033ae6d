// File: claimdesk-common/src/models/offer.rs

use serde::{Deserialize, Serialize};

/// Discount shapes the marketplace supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    Fixed,
    MinimumPurchase,
    QuantityDiscount,
    Bogo,
}

/// Discount details attached to a verified claim.
///
/// The backend owns the discount math. `original_price`/`discounted_price`
/// are the authoritative figures when present; anything computed here is
/// advisory display text and must never be charged from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountInfo {
    pub discount_type: DiscountKind,
    pub discount_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_text: Option<String>,
}

impl DiscountInfo {
    /// Server-provided banner if present, otherwise a generated fallback.
    pub fn display_text(&self) -> String {
        if let Some(text) = &self.discount_text {
            return text.clone();
        }
        match self.discount_type {
            DiscountKind::Percentage => format!("{}% off", self.discount_value),
            DiscountKind::Fixed => format!("${:.2} off", self.discount_value),
            DiscountKind::MinimumPurchase => {
                format!("${:.2} off qualifying orders", self.discount_value)
            }
            DiscountKind::QuantityDiscount => {
                format!("{}% off each at quantity", self.discount_value)
            }
            DiscountKind::Bogo => "Buy one get one".to_string(),
        }
    }

    /// Advisory savings figure for display only. Prefers the server's own
    /// prices; falls back to local arithmetic for the two simple kinds.
    pub fn advisory_savings(&self) -> Option<f64> {
        if let (Some(original), Some(discounted)) = (self.original_price, self.discounted_price) {
            return Some((original - discounted).max(0.0));
        }
        match self.discount_type {
            DiscountKind::Percentage => self
                .original_price
                .map(|p| p * (self.discount_value / 100.0)),
            DiscountKind::Fixed => Some(self.discount_value),
            _ => None,
        }
    }
}
