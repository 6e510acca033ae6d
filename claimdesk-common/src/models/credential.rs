// File: claimdesk-common/src/models/credential.rs

use serde::{Deserialize, Serialize};

/// Bearer credential for the marketplace API.
///
/// Always handed to API clients at construction; nothing in this workspace
/// reads a token out of ambient storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCredential {
    pub bearer_token: String,
}

impl ApiCredential {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
        }
    }

    /// A credential with no token never reaches the network.
    pub fn is_usable(&self) -> bool {
        !self.bearer_token.trim().is_empty()
    }
}
