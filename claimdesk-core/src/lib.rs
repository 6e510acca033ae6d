// claimdesk-core/src/lib.rs

pub mod api;
pub mod capture;
pub mod history;
pub mod session;

pub use claimdesk_common::error::Error;
pub use claimdesk_common::models;

pub use api::client::RedemptionClient;
pub use api::{CompletionOutcome, RedemptionApi, VerificationOutcome};
pub use session::{RedemptionSession, SessionPhase};
