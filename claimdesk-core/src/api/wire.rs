// File: claimdesk-core/src/api/wire.rs
//
// Raw request/response shapes for the redemption endpoints. Responses are
// validated here and converted into the discriminated outcome enums, so the
// rest of the crate never pokes at half-present JSON fields.

use serde::{Deserialize, Serialize};

use claimdesk_common::models::{RedemptionDetails, VerificationMethod, VerifiedClaim};
use claimdesk_common::Error;

use super::messages::ErrorCode;
use super::{CompletionOutcome, VerificationOutcome};

#[derive(Debug, Serialize)]
pub(crate) struct VerifyRequest<'a> {
    pub claim_identifier: &'a str,
    pub verification_type: VerificationMethod,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompleteRequest<'a> {
    pub claim_id: &'a str,
    pub redemption_notes: &'a str,
}

/// JSON shape for `POST business/redeem/verify`.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyResponse {
    pub is_valid: bool,
    #[serde(default)]
    pub claim_details: Option<VerifiedClaim>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl VerifyResponse {
    pub fn into_outcome(self) -> Result<VerificationOutcome, Error> {
        if self.is_valid {
            let details = self.claim_details.ok_or_else(|| {
                Error::Parse("verification reported valid but omitted claim details".to_string())
            })?;
            Ok(VerificationOutcome::Valid(details))
        } else {
            Ok(VerificationOutcome::Invalid {
                message: self
                    .error_message
                    .unwrap_or_else(|| "Claim verification failed".to_string()),
                code: self.error_code.as_deref().map(ErrorCode::parse),
            })
        }
    }
}

/// JSON shape for `POST business/redeem/complete`.
#[derive(Debug, Deserialize)]
pub(crate) struct CompleteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redemption_details: Option<RedemptionDetails>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl CompleteResponse {
    pub fn into_outcome(self) -> Result<CompletionOutcome, Error> {
        if self.success {
            let details = self.redemption_details.ok_or_else(|| {
                Error::Parse("completion reported success but omitted redemption details".to_string())
            })?;
            Ok(CompletionOutcome::Completed(details))
        } else {
            Ok(CompletionOutcome::Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| "Failed to redeem claim".to_string()),
                code: self.error_code.as_deref().map(ErrorCode::parse),
            })
        }
    }
}

/// Error body the backend sends on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn reason(self, status: reqwest::StatusCode) -> String {
        self.detail
            .or(self.message)
            .unwrap_or_else(|| format!("HTTP {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_verify_response_parses_into_claim() {
        let raw = serde_json::json!({
            "is_valid": true,
            "claim_id": "AQ51HP87",
            "claim_details": {
                "id": "7d9f8a3e-1111-4222-8333-444455556666",
                "claim_id": "AQ51HP87",
                "claim_type": "in_store",
                "claimed_at": "2026-08-01T12:00:00Z",
                "customer": { "name": "Jane Doe", "email": "jane@example.com" },
                "offer": {
                    "id": "7d9f8a3e-aaaa-4bbb-8ccc-dddeeefff000",
                    "title": "20% off Widget",
                    "product_name": "Widget"
                },
                "discount_info": {
                    "discount_type": "percentage",
                    "discount_value": 20.0,
                    "original_price": 10.0,
                    "discounted_price": 8.0,
                    "discount_text": "20% off"
                }
            }
        });
        let resp: VerifyResponse = serde_json::from_value(raw).unwrap();
        match resp.into_outcome().unwrap() {
            VerificationOutcome::Valid(claim) => {
                assert_eq!(claim.claim_id, "AQ51HP87");
                assert_eq!(claim.customer.name, "Jane Doe");
                assert_eq!(claim.discount_info.discounted_price, Some(8.0));
            }
            other => panic!("expected valid outcome, got {other:?}"),
        }
    }

    #[test]
    fn invalid_verify_response_keeps_backend_message() {
        let raw = serde_json::json!({
            "is_valid": false,
            "error_message": "Claim not found",
            "error_code": "CLAIM_NOT_FOUND"
        });
        let resp: VerifyResponse = serde_json::from_value(raw).unwrap();
        match resp.into_outcome().unwrap() {
            VerificationOutcome::Invalid { message, code } => {
                assert_eq!(message, "Claim not found");
                assert_eq!(code, Some(ErrorCode::ClaimNotFound));
            }
            other => panic!("expected invalid outcome, got {other:?}"),
        }
    }

    #[test]
    fn valid_without_details_is_a_boundary_error() {
        let raw = serde_json::json!({ "is_valid": true });
        let resp: VerifyResponse = serde_json::from_value(raw).unwrap();
        assert!(matches!(resp.into_outcome(), Err(Error::Parse(_))));
    }

    #[test]
    fn rejected_completion_carries_code() {
        let raw = serde_json::json!({
            "success": false,
            "message": "This claim has already been redeemed",
            "error_code": "ALREADY_REDEEMED",
            "redeemed_at": "2026-08-02T09:30:00Z"
        });
        let resp: CompleteResponse = serde_json::from_value(raw).unwrap();
        match resp.into_outcome().unwrap() {
            CompletionOutcome::Rejected { message, code } => {
                assert_eq!(message, "This claim has already been redeemed");
                assert_eq!(code, Some(ErrorCode::AlreadyRedeemed));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
