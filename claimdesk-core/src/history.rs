// File: claimdesk-core/src/history.rs
//
// Read-only pagination over the business's redemption history. Next/prev
// availability is whatever the backend's pagination flags say; the local
// page arithmetic is only consulted when a deployment omits the flags.

use std::sync::Arc;

use tracing::debug;

use claimdesk_common::models::{HistoryPage, RedemptionStats};
use claimdesk_common::Error;

use crate::api::{HistoryQuery, RedemptionApi};

pub struct HistoryBrowser {
    api: Arc<dyn RedemptionApi>,
    query: HistoryQuery,
    current: Option<HistoryPage>,
}

impl HistoryBrowser {
    pub fn new(api: Arc<dyn RedemptionApi>) -> Self {
        Self::with_query(api, HistoryQuery::default())
    }

    pub fn with_query(api: Arc<dyn RedemptionApi>, query: HistoryQuery) -> Self {
        Self {
            api,
            query,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&HistoryPage> {
        self.current.as_ref()
    }

    pub fn has_next(&self) -> bool {
        self.current
            .as_ref()
            .map(|p| p.pagination.next_available())
            .unwrap_or(false)
    }

    pub fn has_prev(&self) -> bool {
        self.current
            .as_ref()
            .map(|p| p.pagination.prev_available())
            .unwrap_or(false)
    }

    /// Fetch the page the query currently points at. Always a fresh round
    /// trip; nothing is cached across reloads.
    pub async fn load(&mut self) -> Result<&HistoryPage, Error> {
        debug!("Loading redemption history page {}", self.query.page);
        let page = self.api.redemption_history(&self.query).await?;
        // The backend's idea of the page number is authoritative.
        self.query.page = page.pagination.page;
        Ok(self.current.insert(page))
    }

    /// Jump to a specific page (1-based).
    pub async fn load_page(&mut self, page: u32) -> Result<&HistoryPage, Error> {
        self.query.page = page.max(1);
        self.load().await
    }

    pub async fn next_page(&mut self) -> Result<&HistoryPage, Error> {
        if self.current.is_none() {
            return self.load().await;
        }
        if !self.has_next() {
            return Err(Error::InvalidInput("Already on the last page".to_string()));
        }
        self.query.page += 1;
        self.load().await
    }

    pub async fn prev_page(&mut self) -> Result<&HistoryPage, Error> {
        if self.current.is_none() {
            return self.load().await;
        }
        if !self.has_prev() {
            return Err(Error::InvalidInput("Already on the first page".to_string()));
        }
        self.query.page = self.query.page.saturating_sub(1).max(1);
        self.load().await
    }

    /// Rolling stats for the dashboard header.
    pub async fn stats(&self, days: u32) -> Result<RedemptionStats, Error> {
        self.api.redemption_stats(days).await
    }
}
