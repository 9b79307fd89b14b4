//! aptos-node-client: Thin wrapper around the Aptos fullnode REST API
//!
//! Fetches account resources (the on-chain structs pool adapters read) and
//! maps transport and decode failures into `waypoint_core::NodeError`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use waypoint_core::{NodeConfig, NodeError};

/// Result type for node client operations
pub type Result<T> = std::result::Result<T, NodeError>;

/// A Move resource attached to an account, with its data left as raw JSON
/// for the caller to interpret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResource {
    #[serde(rename = "type")]
    pub type_: String,
    pub data: serde_json::Value,
}

/// Chain metadata from the API root.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerInfo {
    pub chain_id: u8,
    pub ledger_version: String,
    pub block_height: String,
}

/// High-level Aptos fullnode client
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl NodeClient {
    /// Create a client from configuration. Fails only on an unusable URL or
    /// TLS backend; no network traffic happens here.
    pub fn new(config: &NodeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| NodeError::Unreachable {
                url: config.url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Ledger info from the API root, also usable as a health probe.
    pub async fn ledger_info(&self) -> Result<LedgerInfo> {
        let url = format!("{}/v1", self.base_url);
        self.get_json(&url).await
    }

    /// All Move resources under `address`.
    pub async fn get_account_resources(&self, address: &str) -> Result<Vec<AccountResource>> {
        let url = format!("{}/v1/accounts/{}/resources", self.base_url, address);
        self.get_json(&url).await
    }

    /// A single resource of `resource_type` under `address`.
    pub async fn get_account_resource(
        &self,
        address: &str,
        resource_type: &str,
    ) -> Result<AccountResource> {
        let url = format!(
            "{}/v1/accounts/{}/resource/{}",
            self.base_url, address, resource_type
        );
        let response = self.send(&url).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(NodeError::ResourceNotFound {
                address: address.to_string(),
                resource: resource_type.to_string(),
            });
        }
        Self::decode(response).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(url).await?;
        Self::decode(response).await
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| NodeError::Unreachable {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NodeError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|e| NodeError::ParseError(e.to_string()))
    }
}
