//! Application state and dependency injection.

use itportal_postgres::PgClient;

use crate::service::{BulkReferenceAssigner, PasswordHasher, Result, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pg_client: PgClient,

    password_hasher: PasswordHasher,
    reference_assigner: BulkReferenceAssigner,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to Postgres and applies pending migrations.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let pg_client = config.connect_postgres().await?;
        Self::from_client(pg_client, config)
    }

    /// Builds the state around an already constructed client.
    pub fn from_client(pg_client: PgClient, config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            pg_client,

            password_hasher: PasswordHasher::new(),
            reference_assigner: config.reference_assigner()?,
        })
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(pg_client: PgClient);

impl_di!(password_hasher: PasswordHasher);
impl_di!(reference_assigner: BulkReferenceAssigner);
