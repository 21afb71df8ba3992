//! Timeouts for the network-bound parts of a baseline run.
//!
//! ```ignore
//! use crate::ai::timeout::{TimeoutConfig, with_timeout};
//!
//! let timeouts = TimeoutConfig::from_llm_config(&config.llm);
//! let record = with_timeout(timeouts.analysis, analyzer.analyze(q, doc), "document analysis").await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::config::LlmConfig;
use crate::constants::network as net_constants;
use crate::types::{Result, TowerError};

#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Whole document analysis, including response parsing
    pub analysis: Duration,
    /// Establishing a connection to the provider
    pub connection: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            analysis: Duration::from_secs(net_constants::DEFAULT_TIMEOUT_SECS),
            connection: Duration::from_secs(net_constants::CONNECTION_TIMEOUT_SECS),
        }
    }
}

impl TimeoutConfig {
    /// Analysis gets the request timeout plus a little slack for parsing
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        Self {
            analysis: Duration::from_secs(config.timeout_secs.saturating_add(5)),
            ..Self::default()
        }
    }
}

/// Run a fallible future, failing with [`TowerError::Timeout`] when it takes too long
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("{} timed out after {:?}", operation_name, timeout);
            Err(TowerError::timeout(operation_name, timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_from_llm_config() {
        let config = LlmConfig {
            timeout_secs: 60,
            ..LlmConfig::default()
        };
        let timeouts = TimeoutConfig::from_llm_config(&config);
        assert_eq!(timeouts.analysis.as_secs(), 65);
        assert_eq!(timeouts.connection.as_secs(), 30);
    }

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, TowerError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, TowerError>(42)
            },
            "document analysis",
        )
        .await;
        match result.unwrap_err() {
            TowerError::Timeout { operation, .. } => assert_eq!(operation, "document analysis"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
