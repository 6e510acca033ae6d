// File: claimdesk-core/src/api/messages.rs
//
// Backend error codes and the operator-facing wording for them. The raw
// backend message is kept alongside so nothing is lost when a code is
// unrecognized.

use std::fmt;

use claimdesk_common::Error;

/// Machine-readable failure codes the backend attaches to verification and
/// completion responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    ClaimNotFound,
    AlreadyRedeemed,
    OfferExpired,
    UnauthorizedBusiness,
    InvalidClaimFormat,
    Other(String),
}

impl ErrorCode {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "CLAIM_NOT_FOUND" => ErrorCode::ClaimNotFound,
            "ALREADY_REDEEMED" => ErrorCode::AlreadyRedeemed,
            "OFFER_EXPIRED" => ErrorCode::OfferExpired,
            "UNAUTHORIZED_BUSINESS" => ErrorCode::UnauthorizedBusiness,
            "INVALID_CLAIM_FORMAT" => ErrorCode::InvalidClaimFormat,
            other => ErrorCode::Other(other.to_string()),
        }
    }

    /// Whether the operator can retry the same claim after this failure.
    /// A claim that is gone, spent, expired, or not ours will not come back.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ErrorCode::AlreadyRedeemed | ErrorCode::OfferExpired | ErrorCode::UnauthorizedBusiness
        )
    }

    /// Friendly wording for the operator, mirroring what the staff dashboard
    /// showed for each code.
    pub fn operator_message(&self) -> Option<&'static str> {
        match self {
            ErrorCode::ClaimNotFound => {
                Some("Claim not found. Please check the claim ID and try again.")
            }
            ErrorCode::AlreadyRedeemed => Some("This offer has already been redeemed."),
            ErrorCode::OfferExpired => Some("This offer has expired and cannot be redeemed."),
            ErrorCode::UnauthorizedBusiness => Some("This claim belongs to a different business."),
            ErrorCode::InvalidClaimFormat => {
                Some("Invalid claim ID format. Please check and try again.")
            }
            ErrorCode::Other(_) => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::ClaimNotFound => write!(f, "CLAIM_NOT_FOUND"),
            ErrorCode::AlreadyRedeemed => write!(f, "ALREADY_REDEEMED"),
            ErrorCode::OfferExpired => write!(f, "OFFER_EXPIRED"),
            ErrorCode::UnauthorizedBusiness => write!(f, "UNAUTHORIZED_BUSINESS"),
            ErrorCode::InvalidClaimFormat => write!(f, "INVALID_CLAIM_FORMAT"),
            ErrorCode::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// What the operator sees when something in the workflow fails, plus the
/// flags the session uses to pick the next state.
#[derive(Debug, Clone)]
pub struct OperatorError {
    pub message: String,
    pub code: Option<ErrorCode>,
    pub recoverable: bool,
    pub requires_reauth: bool,
}

impl OperatorError {
    /// Build from a backend rejection. The backend's message wins; the code
    /// only supplies wording when the backend sent none.
    pub fn from_backend(message: String, code: Option<ErrorCode>) -> Self {
        let recoverable = code.as_ref().map(|c| c.is_recoverable()).unwrap_or(true);
        let message = if message.is_empty() {
            code.as_ref()
                .and_then(|c| c.operator_message())
                .unwrap_or("An unexpected error occurred. Please try again.")
                .to_string()
        } else {
            message
        };
        Self {
            message,
            code,
            recoverable,
            requires_reauth: false,
        }
    }

    /// Build from a transport-level failure. Always retryable by the
    /// operator, never retried automatically.
    pub fn from_transport(err: &Error) -> Self {
        match err {
            Error::Auth(msg) => Self {
                message: msg.clone(),
                code: None,
                recoverable: false,
                requires_reauth: true,
            },
            _ => Self {
                message: "Network error. Please check your connection and try again.".to_string(),
                code: None,
                recoverable: true,
                requires_reauth: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        assert_eq!(ErrorCode::parse("ALREADY_REDEEMED"), ErrorCode::AlreadyRedeemed);
        assert_eq!(
            ErrorCode::parse("SOMETHING_ELSE"),
            ErrorCode::Other("SOMETHING_ELSE".to_string())
        );
        assert_eq!(ErrorCode::AlreadyRedeemed.to_string(), "ALREADY_REDEEMED");
    }

    #[test]
    fn recoverability_split() {
        assert!(ErrorCode::ClaimNotFound.is_recoverable());
        assert!(ErrorCode::InvalidClaimFormat.is_recoverable());
        assert!(!ErrorCode::AlreadyRedeemed.is_recoverable());
        assert!(!ErrorCode::OfferExpired.is_recoverable());
        assert!(!ErrorCode::UnauthorizedBusiness.is_recoverable());
    }

    #[test]
    fn backend_message_wins_over_code_wording() {
        let err = OperatorError::from_backend(
            "This claim has already been redeemed".to_string(),
            Some(ErrorCode::AlreadyRedeemed),
        );
        assert_eq!(err.message, "This claim has already been redeemed");
        assert!(!err.recoverable);
    }

    #[test]
    fn empty_message_falls_back_to_code_wording() {
        let err = OperatorError::from_backend(String::new(), Some(ErrorCode::OfferExpired));
        assert_eq!(err.message, "This offer has expired and cannot be redeemed.");
    }

    #[test]
    fn auth_errors_require_reauth() {
        let err = OperatorError::from_transport(&Error::Auth("session expired".into()));
        assert!(err.requires_reauth);
        assert!(!err.recoverable);
    }
}
