#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use itportal_postgres::{PgClient, PgClientMigrationExt, PgConfig};
use serde::{Deserialize, Serialize};

use crate::service::{
    BulkReferenceAssigner, DEFAULT_MAX_ATTEMPTS, Error, RandomCandidateGenerator, Result,
};

const TRACING_TARGET: &str = "itportal_server::service::config";

/// Upper bound on reference-number attempts per account.
const MAX_REFERENCE_ATTEMPTS: u32 = 100;

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Postgres connection and pool settings.
    #[cfg_attr(feature = "config", clap(flatten))]
    #[builder(default)]
    pub postgres_config: PgConfig,

    /// Prefix of generated account reference numbers.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REFERENCE_PREFIX", default_value = "REF")
    )]
    #[builder(default = "RandomCandidateGenerator::DEFAULT_PREFIX.to_owned()")]
    pub reference_prefix: String,

    /// Candidates tried per account before reference assignment gives up.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REFERENCE_MAX_ATTEMPTS", default_value = "10")
    )]
    #[builder(default = "DEFAULT_MAX_ATTEMPTS")]
    pub reference_max_attempts: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            postgres_config: PgConfig::default(),
            reference_prefix: RandomCandidateGenerator::DEFAULT_PREFIX.to_owned(),
            reference_max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ServiceConfig {
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Checks the reference settings and the Postgres settings.
    pub fn validate(&self) -> Result<()> {
        validate_reference(&self.reference_prefix, self.reference_max_attempts)
            .map_err(Error::config)?;
        self.postgres_config.validate()?;
        Ok(())
    }

    /// Builds the Postgres client and applies pending migrations.
    pub async fn connect_postgres(&self) -> Result<PgClient> {
        let pg_client = self.postgres_config.clone().build().map_err(|e| {
            Error::internal("postgres", "Failed to create database client").with_source(e)
        })?;

        let result = pg_client.run_pending_migrations().await.map_err(|e| {
            Error::internal("postgres", "Failed to apply database migrations").with_source(e)
        })?;

        tracing::info!(
            target: TRACING_TARGET,
            applied = result.processed_versions.len(),
            duration = ?result.duration,
            "Database migrations are up to date"
        );

        Ok(pg_client)
    }

    /// Builds the reference-number assigner from the configured prefix and limit.
    pub fn reference_assigner(&self) -> Result<BulkReferenceAssigner> {
        validate_reference(&self.reference_prefix, self.reference_max_attempts)
            .map_err(Error::config)?;

        Ok(BulkReferenceAssigner::new(
            RandomCandidateGenerator::new(self.reference_prefix.trim()),
            self.reference_max_attempts,
        ))
    }
}

impl ServiceConfigBuilder {
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(postgres_config) = &builder.postgres_config {
            postgres_config.validate().map_err(|e| e.to_string())?;
        }

        let prefix = builder
            .reference_prefix
            .as_deref()
            .unwrap_or(RandomCandidateGenerator::DEFAULT_PREFIX);
        let max_attempts = builder.reference_max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);

        validate_reference(prefix, max_attempts)
    }
}

fn validate_reference(prefix: &str, max_attempts: u32) -> Result<(), String> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err("Reference prefix cannot be empty".to_owned());
    }

    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Reference prefix must be alphanumeric".to_owned());
    }

    if !(1..=MAX_REFERENCE_ATTEMPTS).contains(&max_attempts) {
        return Err(format!(
            "Reference max attempts must be between 1 and {}",
            MAX_REFERENCE_ATTEMPTS
        ));
    }

    Ok(())
}
