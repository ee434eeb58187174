use crate::config::types::{ExecutorConfig, HttpConfig, ScanConfig, ServiceEndpoints};
use crate::ConfigError;
use url::Url;

/// Largest accepted per-operation timeout (seconds)
const MAX_OPERATION_TIMEOUT_SECS: u64 = 600;

/// Largest accepted concurrency bound
const MAX_CONCURRENT_OPERATIONS: usize = 1000;

/// Validates the entire configuration
pub fn validate(config: &ScanConfig) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_executor_config(&config.executor)?;
    validate_service_endpoints(&config.services)?;
    Ok(())
}

/// Validates HTTP session configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates executor configuration
fn validate_executor_config(config: &ExecutorConfig) -> Result<(), ConfigError> {
    if config.operation_timeout_secs < 1 || config.operation_timeout_secs > MAX_OPERATION_TIMEOUT_SECS
    {
        return Err(ConfigError::Validation(format!(
            "operation-timeout-secs must be between 1 and {}, got {}",
            MAX_OPERATION_TIMEOUT_SECS, config.operation_timeout_secs
        )));
    }

    if config.max_concurrent_operations > MAX_CONCURRENT_OPERATIONS {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-operations must be <= {}, got {}",
            MAX_CONCURRENT_OPERATIONS, config.max_concurrent_operations
        )));
    }

    Ok(())
}

/// Validates the third-party service endpoints
fn validate_service_endpoints(config: &ServiceEndpoints) -> Result<(), ConfigError> {
    validate_endpoint("duckduckgo-endpoint", &config.duckduckgo)?;
    validate_endpoint("google-endpoint", &config.google)?;
    Ok(())
}

/// Validates that an endpoint is an absolute HTTP(S) URL
fn validate_endpoint(name: &str, endpoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", name, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            name, endpoint
        )));
    }

    Ok(())
}
