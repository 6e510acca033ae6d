// File: claimdesk-core/src/api/client.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use claimdesk_common::models::{
    ApiCredential, HistoryPage, RedemptionStats, VerificationMethod,
};
use claimdesk_common::Error;

use super::wire::{CompleteRequest, CompleteResponse, ErrorBody, VerifyRequest, VerifyResponse};
use super::{CompletionOutcome, HistoryQuery, RedemptionApi, VerificationOutcome};

const VERIFY_PATH: &str = "business/redeem/verify";
const COMPLETE_PATH: &str = "business/redeem/complete";
const HISTORY_PATH: &str = "business/redeem/history";
const STATS_PATH: &str = "business/redeem/stats";

/// Encapsulates the marketplace redemption endpoints behind an explicit
/// credential. The credential is handed over at construction; there is no
/// ambient token lookup anywhere in the call path.
pub struct RedemptionClient {
    http_client: Client,
    base_url: Url,
    credential: ApiCredential,
}

impl RedemptionClient {
    pub fn new(base_url: &str, credential: ApiCredential) -> Result<Self, Error> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)?;

        let http_client = reqwest::ClientBuilder::new()
            .user_agent("claimdesk/0.1")
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| Error::Api(format!("Failed to build reqwest client: {e}")))?;

        Ok(Self {
            http_client,
            base_url,
            credential,
        })
    }

    /// Absence of a token short-circuits before any network call is made.
    fn bearer_token(&self) -> Result<&str, Error> {
        if !self.credential.is_usable() {
            return Err(Error::Auth(
                "Authentication required: no bearer token is configured".to_string(),
            ));
        }
        Ok(self.credential.bearer_token.trim())
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    async fn check_status(path: &str, resp: Response) -> Result<Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        match status {
            StatusCode::UNAUTHORIZED => Err(Error::Auth(
                "Your session has expired. Please log in again.".to_string(),
            )),
            StatusCode::FORBIDDEN => Err(Error::Auth(
                "You do not have permission to perform this action.".to_string(),
            )),
            _ => {
                let body: ErrorBody = resp.json().await.unwrap_or_default();
                Err(Error::Api(format!(
                    "{path} => HTTP {status}: {}",
                    body.reason(status)
                )))
            }
        }
    }
}

#[async_trait]
impl RedemptionApi for RedemptionClient {
    async fn verify_claim(
        &self,
        identifier: &str,
        method: VerificationMethod,
    ) -> Result<VerificationOutcome, Error> {
        let token = self.bearer_token()?;
        let url = self.endpoint(VERIFY_PATH)?;

        info!("Verifying claim {identifier} ({method:?})");
        let resp = self
            .http_client
            .post(url)
            .bearer_auth(token)
            .json(&VerifyRequest {
                claim_identifier: identifier,
                verification_type: method,
            })
            .send()
            .await
            .map_err(|e| Error::Api(format!("verify_claim: request failed => {e}")))?;

        let resp = Self::check_status(VERIFY_PATH, resp).await?;
        let parsed: VerifyResponse = resp
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Parsing VerifyResponse => {e}")))?;

        let outcome = parsed.into_outcome()?;
        if let VerificationOutcome::Invalid { message, .. } = &outcome {
            warn!("Claim {identifier} rejected by backend: {message}");
        }
        Ok(outcome)
    }

    async fn complete_redemption(
        &self,
        claim_id: &str,
        notes: &str,
    ) -> Result<CompletionOutcome, Error> {
        let token = self.bearer_token()?;
        let url = self.endpoint(COMPLETE_PATH)?;

        info!("Completing redemption for claim {claim_id}");
        let resp = self
            .http_client
            .post(url)
            .bearer_auth(token)
            .json(&CompleteRequest {
                claim_id,
                redemption_notes: notes,
            })
            .send()
            .await
            .map_err(|e| Error::Api(format!("complete_redemption: request failed => {e}")))?;

        let resp = Self::check_status(COMPLETE_PATH, resp).await?;
        let parsed: CompleteResponse = resp
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Parsing CompleteResponse => {e}")))?;

        let outcome = parsed.into_outcome()?;
        match &outcome {
            CompletionOutcome::Completed(details) => {
                info!("Claim {} redeemed at {}", details.claim_id, details.redeemed_at);
            }
            CompletionOutcome::Rejected { message, .. } => {
                warn!("Redemption of {claim_id} rejected: {message}");
            }
        }
        Ok(outcome)
    }

    async fn redemption_history(&self, query: &HistoryQuery) -> Result<HistoryPage, Error> {
        let token = self.bearer_token()?;
        let url = self.endpoint(HISTORY_PATH)?;

        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
            ("redeemed_only", query.redeemed_only.to_string()),
        ];
        if let Some(start) = query.start_date {
            params.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = query.end_date {
            params.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(offer_id) = query.offer_id {
            params.push(("offer_id", offer_id.to_string()));
        }

        debug!("Fetching redemption history page {}", query.page);
        let resp = self
            .http_client
            .get(url)
            .bearer_auth(token)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::Api(format!("redemption_history: request failed => {e}")))?;

        let resp = Self::check_status(HISTORY_PATH, resp).await?;
        resp.json::<HistoryPage>()
            .await
            .map_err(|e| Error::Parse(format!("Parsing HistoryPage => {e}")))
    }

    async fn redemption_stats(&self, days: u32) -> Result<RedemptionStats, Error> {
        let token = self.bearer_token()?;
        let url = self.endpoint(STATS_PATH)?;

        debug!("Fetching redemption stats for the last {days} days");
        let resp = self
            .http_client
            .get(url)
            .bearer_auth(token)
            .query(&[("days", days.to_string())])
            .send()
            .await
            .map_err(|e| Error::Api(format!("redemption_stats: request failed => {e}")))?;

        let resp = Self::check_status(STATS_PATH, resp).await?;
        resp.json::<RedemptionStats>()
            .await
            .map_err(|e| Error::Parse(format!("Parsing RedemptionStats => {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_short_circuits_before_network() {
        let client =
            RedemptionClient::new("http://localhost:8001/api/v1", ApiCredential::new("")).unwrap();
        let err = client
            .verify_claim("AQ51HP87", VerificationMethod::ClaimId)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[test]
    fn base_url_join_keeps_api_prefix() {
        let client = RedemptionClient::new(
            "http://localhost:8001/api/v1",
            ApiCredential::new("token"),
        )
        .unwrap();
        let url = client.endpoint(VERIFY_PATH).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8001/api/v1/business/redeem/verify"
        );
    }
}
