//! HTTP middleware settings re-exported from `itportal-server`.

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use itportal_server::middleware::{CorsConfig, OpenApiConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Longest accepted request deadline, in seconds.
const MAX_REQUEST_TIMEOUT: u64 = 300;

/// CORS, OpenAPI and recovery settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[clap(flatten)]
    pub cors: CorsConfig,

    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    pub fn validate(&self) -> AnyhowResult<()> {
        let timeout = self.recovery.request_timeout;
        if timeout == 0 || timeout > MAX_REQUEST_TIMEOUT {
            return Err(anyhow!(
                "Request timeout {timeout} seconds is invalid. Must be between 1 and {MAX_REQUEST_TIMEOUT} seconds."
            ));
        }

        for path in [&self.openapi.open_api_json, &self.openapi.scalar_ui] {
            if !path.starts_with('/') {
                return Err(anyhow!("OpenAPI path {path:?} must start with '/'"));
            }
        }

        Ok(())
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allow_credentials,
            max_age_secs = self.cors.max_age_seconds,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            openapi_path = %self.openapi.open_api_json,
            scalar_path = %self.openapi.scalar_ui,
            "OpenAPI configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "Recovery configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MiddlewareConfig {
        MiddlewareConfig {
            cors: CorsConfig::default(),
            openapi: OpenApiConfig::default(),
            recovery: RecoveryConfig::default(),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn rejects_zero_timeout_and_relative_paths() {
        let mut middleware = config();
        middleware.recovery = RecoveryConfig::with_timeout_secs(0);
        assert!(middleware.validate().is_err());

        let mut middleware = config();
        middleware.openapi.scalar_ui = "docs".to_owned();
        assert!(middleware.validate().is_err());
    }
}
