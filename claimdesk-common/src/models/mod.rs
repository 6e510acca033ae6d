// File: claimdesk-common/src/models/mod.rs
pub mod claim;
pub mod credential;
pub mod offer;
pub mod redemption;

pub use claim::{ClaimType, CustomerInfo, OfferSummary, VerificationMethod, VerifiedClaim};
pub use credential::ApiCredential;
pub use offer::{DiscountInfo, DiscountKind};
pub use redemption::{
    ClaimTypeCounts, DailyCount, HistoryOffer, HistoryPage, HistorySummary, PageInfo,
    RedemptionDetails, RedemptionRecord, RedemptionStats,
};
