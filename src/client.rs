//! Top-level client
//!
//! Wires configuration, transport, retry policy and the resource APIs
//! together.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{Credentials, HttpClient, HttpClientConfig};
use crate::instances::InstancesApi;
use crate::pagination::Fetcher;
use crate::relationships::RelationshipApi;
use crate::retry::RetryPolicy;
use crate::types::{JsonObject, Method, Params};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for one project of the data-modeling service
#[derive(Debug, Clone)]
pub struct DmsClient {
    fetcher: Arc<Fetcher>,
}

impl DmsClient {
    /// Wrap an already configured fetcher
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    /// Build a client from validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(config.project_url())
            .timeout(Duration::from_secs(config.timeout_secs));
        if let Some(token) = &config.token {
            builder = builder.credentials(Credentials::bearer(token));
        }
        if let Some(rate_limit) = &config.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        for (key, value) in &config.headers {
            builder = builder.header(key, value);
        }

        let http = HttpClient::with_config(builder.build())?;
        let policy = RetryPolicy::default().with_max_tries(config.max_tries);
        debug!("Client for {} ready ({:?})", config.project_url(), policy);

        Ok(Self::new(Fetcher::new(http).with_policy(policy)))
    }

    /// Nodes and edges
    pub fn instances(&self) -> InstancesApi {
        InstancesApi::new(Arc::clone(&self.fetcher))
    }

    /// Edge reconciliation
    pub fn relationships(&self) -> RelationshipApi {
        RelationshipApi::new(self.instances())
    }

    /// Raw paginated call against a project-relative path
    pub async fn fetch(&self, method: Method, path: &str, params: &Params) -> Result<JsonObject> {
        self.fetcher.fetch(method, path, params).await
    }
}
