// File: claimdesk-core/src/capture/extract.rs
//
// Claim identifiers arrive in several wrappings: a verification URL, a URL
// with a claim_id parameter, a small JSON payload, or the bare id itself.
// Extraction is best-effort; the backend re-validates whatever we send.

use once_cell::sync::Lazy;
use regex::Regex;

use claimdesk_common::Error;

static BARE_CLAIM_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]{6,20}$").unwrap());

/// Bare claim ids are 6-20 uppercase alphanumerics.
pub fn is_valid_claim_id(candidate: &str) -> bool {
    BARE_CLAIM_ID.is_match(candidate.trim().to_uppercase().as_str())
}

/// Pull a claim id out of scanned QR content. Falls back to the trimmed
/// content itself when no known wrapping matches.
pub fn extract_claim_id(content: &str) -> String {
    let content = content.trim();

    // Format 1: full verification URL, .../verify/<id>
    if let Some(rest) = content.split("/verify/").nth(1) {
        let id = rest.split(['?', '#']).next().unwrap_or("");
        if !id.is_empty() {
            return id.to_string();
        }
    }

    // Format 2: URL carrying a claim_id parameter
    if let Some(rest) = content.split("claim_id=").nth(1) {
        let id = rest.split(['&', '#']).next().unwrap_or("");
        if !id.is_empty() {
            return id.to_string();
        }
    }

    // Format 3: JSON payload with a claim_id or id key
    if content.starts_with('{') && content.ends_with('}') {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(content) {
            if let Some(id) = value["claim_id"].as_str().or_else(|| value["id"].as_str()) {
                return id.to_string();
            }
        }
    }

    // Format 4: the content is the claim id
    content.to_string()
}

/// Normalize operator-typed input: trim and uppercase. Empty input is a
/// local error and never reaches the backend.
pub fn normalize_manual_code(text: &str) -> Result<String, Error> {
    let cleaned = text.trim().to_uppercase();
    if cleaned.is_empty() {
        return Err(Error::InvalidInput(
            "Claim identifier must not be empty".to_string(),
        ));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_verification_url() {
        assert_eq!(
            extract_claim_id("https://example.com/verify/AQ51HP87?src=qr"),
            "AQ51HP87"
        );
    }

    #[test]
    fn extracts_from_claim_id_parameter() {
        assert_eq!(
            extract_claim_id("https://example.com/redeem?claim_id=XYZ123AB&x=1"),
            "XYZ123AB"
        );
    }

    #[test]
    fn extracts_from_json_payload() {
        assert_eq!(extract_claim_id(r#"{"claim_id":"AQ51HP87"}"#), "AQ51HP87");
        assert_eq!(extract_claim_id(r#"{"id":"XYZ123AB"}"#), "XYZ123AB");
    }

    #[test]
    fn bare_content_passes_through_trimmed() {
        assert_eq!(extract_claim_id("  AQ51HP87  "), "AQ51HP87");
        assert_eq!(extract_claim_id("not a claim"), "not a claim");
    }

    #[test]
    fn claim_id_format_check() {
        assert!(is_valid_claim_id("AQ51HP87"));
        assert!(is_valid_claim_id(" aq51hp87 "));
        assert!(!is_valid_claim_id("SHORT"));
        assert!(!is_valid_claim_id("HAS SPACES IN IT"));
        assert!(!is_valid_claim_id(""));
    }

    #[test]
    fn manual_code_is_trimmed_and_uppercased() {
        assert_eq!(normalize_manual_code("  aq51hp87 ").unwrap(), "AQ51HP87");
        assert!(matches!(
            normalize_manual_code("   "),
            Err(Error::InvalidInput(_))
        ));
    }
}
