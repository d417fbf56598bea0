//! CORS, security headers, compression and body limits.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderValue};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::extract::reject::enhanced_json::MAX_JSON_PAYLOAD_SIZE;

const TRACING_TARGET: &str = "itportal_server::security";

/// Upper bound on any request body, in bytes.
pub const MAX_BODY_SIZE: usize = MAX_JSON_PAYLOAD_SIZE;

/// Origins allowed when none are configured.
const DEVELOPMENT_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS, security headers, compression and body limits.
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self;

    /// Same as [`with_security`] with development CORS origins.
    ///
    /// [`with_security`]: RouterSecurityExt::with_security
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self {
        let cors_layer = CorsLayer::new()
            .allow_origin(cors.to_header_values())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(cors.allow_credentials)
            .max_age(cors.max_age());

        let mut router = self
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
            .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
            .layer(CompressionLayer::new())
            .layer(cors_layer)
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static(headers.frame_options.as_str()),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static(headers.referrer_policy.as_str()),
            ));

        match HeaderValue::from_str(&headers.hsts_header_value()) {
            Ok(hsts) => {
                router = router.layer(SetResponseHeaderLayer::overriding(
                    header::STRICT_TRANSPORT_SECURITY,
                    hsts,
                ));
            }
            Err(error) => {
                tracing::warn!(target: TRACING_TARGET, error = %error, "invalid HSTS value, header skipped");
            }
        }

        if let Some(csp) = headers.content_security_policy.as_deref() {
            match HeaderValue::from_str(csp) {
                Ok(csp) => {
                    router = router.layer(SetResponseHeaderLayer::overriding(
                        header::CONTENT_SECURITY_POLICY,
                        csp,
                    ));
                }
                Err(error) => {
                    tracing::warn!(target: TRACING_TARGET, error = %error, "invalid CSP value, header skipped");
                }
            }
        }

        router
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default(), &SecurityHeadersConfig::default())
    }
}

/// Cross-origin settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Allowed origins. Empty means local development origins.
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-origins", env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Preflight cache lifetime in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-max-age", env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    #[cfg_attr(
        feature = "config",
        arg(
            long = "cors-allow-credentials",
            env = "CORS_ALLOW_CREDENTIALS",
            default_value = "true",
            action = clap::ArgAction::Set
        )
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Parses the configured origins, skipping invalid ones.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            return DEVELOPMENT_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect();
        }

        self.allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(target: TRACING_TARGET, origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect()
    }
}

/// Response security headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityHeadersConfig {
    pub hsts_max_age_seconds: u64,
    pub hsts_include_subdomains: bool,
    pub content_security_policy: Option<String>,
    pub frame_options: FrameOptions,
    pub referrer_policy: ReferrerPolicy,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            hsts_max_age_seconds: 31_536_000,
            hsts_include_subdomains: true,
            content_security_policy: Some(
                "default-src 'self'; \
                 script-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net; \
                 style-src 'self' 'unsafe-inline'; \
                 img-src 'self' data:; \
                 frame-ancestors 'none'"
                    .to_owned(),
            ),
            frame_options: FrameOptions::Deny,
            referrer_policy: ReferrerPolicy::StrictOriginWhenCrossOrigin,
        }
    }
}

impl SecurityHeadersConfig {
    pub fn hsts_header_value(&self) -> String {
        if self.hsts_include_subdomains {
            format!("max-age={}; includeSubDomains", self.hsts_max_age_seconds)
        } else {
            format!("max-age={}", self.hsts_max_age_seconds)
        }
    }
}

/// `X-Frame-Options` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOptions {
    Deny,
    SameOrigin,
}

impl FrameOptions {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }
}

/// `Referrer-Policy` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferrerPolicy {
    NoReferrer,
    Origin,
    StrictOriginWhenCrossOrigin,
}

impl ReferrerPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoReferrer => "no-referrer",
            Self::Origin => "origin",
            Self::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[test]
    fn invalid_origins_are_skipped() {
        let config = CorsConfig {
            allowed_origins: vec!["https://portal.example.com".to_owned(), "bad\norigin".to_owned()],
            ..CorsConfig::default()
        };

        assert_eq!(config.to_header_values().len(), 1);
        assert_eq!(CorsConfig::default().to_header_values().len(), DEVELOPMENT_ORIGINS.len());
    }

    #[tokio::test]
    async fn security_headers_are_set() -> anyhow::Result<()> {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .with_default_security();
        let server = TestServer::new(app)?;

        let response = server.get("/ping").await;
        response.assert_status_ok();
        assert_eq!(response.header("x-frame-options"), "DENY");
        assert_eq!(response.header("x-content-type-options"), "nosniff");
        assert_eq!(
            response.header("strict-transport-security"),
            "max-age=31536000; includeSubDomains"
        );
        Ok(())
    }
}
