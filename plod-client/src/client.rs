use crate::config::ClientConfig;
use crate::error::{Result, SparqlError};
use crate::result::{QueryResults, SparqlResponse};
use reqwest::Client;
use reqwest::header::ACCEPT;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Read-only SELECT client for one SPARQL endpoint.
pub struct SparqlClient {
    client: Client,
    config: ClientConfig,
    cache: Option<Arc<Mutex<HashMap<String, QueryResults>>>>,
}

impl SparqlClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let config = ClientConfig {
            endpoint: endpoint.into(),
            ..ClientConfig::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.div_ceil(2)))
            .pool_idle_timeout(Duration::from_secs(90))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        let cache = config
            .cache
            .then(|| Arc::new(Mutex::new(HashMap::new())));

        Ok(Self {
            client,
            config: config.clone(),
            cache,
        })
    }

    pub fn with_timeout(self, timeout_secs: u64) -> Result<Self> {
        let mut config = self.config;
        config.timeout_secs = timeout_secs;
        Self::from_config(&config)
    }

    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Result<Self> {
        let mut config = self.config;
        config.user_agent = user_agent.into();
        Self::from_config(&config)
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.config.cache = enabled;
        self.cache = match (enabled, self.cache) {
            (true, Some(existing)) => Some(existing),
            (true, None) => Some(Arc::new(Mutex::new(HashMap::new()))),
            (false, _) => None,
        };
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a SELECT query and return its result table
    pub async fn select(&self, query: &str) -> Result<QueryResults> {
        if let Some(cache) = &self.cache {
            let cache = cache.lock().await;
            if let Some(hit) = cache.get(query) {
                debug!("Cache hit ({} rows)", hit.len());
                return Ok(hit.clone());
            }
        }

        debug!("SPARQL query against {}:\n{}", self.config.endpoint, query);

        let start = Instant::now();
        let response = self
            .client
            .get(&self.config.endpoint)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .query(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let elapsed = start.elapsed();

        if !status.is_success() {
            warn!("Endpoint returned {} after {:?}", status, elapsed);
            return Err(SparqlError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        trace!("Query response: {}", body);

        let parsed: SparqlResponse = serde_json::from_str(&body)?;
        let results = QueryResults::from_response(parsed);
        info!("Query returned {} rows in {:?}", results.len(), elapsed);

        if let Some(cache) = &self.cache {
            cache.lock().await.insert(query.to_string(), results.clone());
        }

        Ok(results)
    }

    pub async fn cached_queries(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.lock().await.len(),
            None => 0,
        }
    }

    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().await.clear();
        }
    }
}
