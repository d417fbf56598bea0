//! OpenAPI document and Scalar reference UI.
//!
//! The document is generated from every route registered through
//! [`ApiRouter::api_route`], so handler docs and request/response schemas
//! stay in sync with the code that serves them.
//!
//! ```rust,ignore
//! use itportal_server::handler::routes;
//! use itportal_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//!
//! let app = routes().with_open_api(&OpenApiConfig::default());
//! ```

use aide::axum::ApiRouter;
use aide::openapi::{Info, OpenApi};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Where the OpenAPI document and the reference UI are served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path of the OpenAPI JSON document.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Path of the Scalar reference UI.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

/// Extension trait for [`ApiRouter`] to publish its OpenAPI document.
pub trait RouterOpenApiExt<S> {
    /// Finishes the router with the default IT Portal API info.
    fn with_open_api(self, config: &OpenApiConfig) -> Router<S>;

    /// Finishes the router with caller-provided API info.
    fn with_open_api_info(self, config: &OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: &OpenApiConfig) -> Router<S> {
        let info = Info {
            title: "IT Portal API".to_owned(),
            summary: Some("Sales and taskflow administration".to_owned()),
            description: Some(
                "Bulk maintenance of taskflow accounts, reference numbers, activities, \
                 inquiries, progress records and users."
                    .to_owned(),
            ),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: &OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info,
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json);
        self.route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi))
            .finish_api(&mut api)
            .layer(Extension(api))
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;
    use crate::handler::routes;
    use crate::handler::test::create_test_state;

    #[tokio::test]
    async fn document_lists_the_api_routes() -> anyhow::Result<()> {
        let app = routes()
            .with_open_api(&OpenApiConfig::default())
            .with_state(create_test_state()?);
        let server = TestServer::new(app)?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();

        let document = response.json::<serde_json::Value>();
        assert_eq!(document["info"]["title"], "IT Portal API");
        assert!(document["paths"]["/taskflow/accounts/UpdateReferenceNumber"].is_object());
        assert!(document["paths"]["/health"].is_object());
        Ok(())
    }
}
