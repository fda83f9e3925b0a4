//! Clearbit resolution via the public autocomplete endpoint.
//!
//! The suggest endpoint is unauthenticated and answers a suggestion list;
//! the first suggestion's domain is normalized and turned into a logo CDN
//! URL. No second call is made since the CDN serves images by domain.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use logofill_shared::{LogofillError, Result};

use crate::domain::{clean_domain, logo_cdn_url};

use super::{ResolverStrategy, StrategyOutcome};

/// Public root of the Clearbit autocomplete API.
const DEFAULT_API_BASE: &str = "https://autocomplete.clearbit.com";

/// Timeout in seconds for each autocomplete call.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One entry of the autocomplete suggestion list.
#[derive(Debug, Deserialize)]
struct Suggestion {
    #[serde(default)]
    domain: Option<String>,
}

/// Looks a company name up through Clearbit autocomplete and maps the first
/// suggested domain onto the logo CDN.
pub struct ClearbitResolver {
    client: Client,
    api_base: String,
}

impl ClearbitResolver {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LogofillError::Resolve(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.into(),
        })
    }

    /// Point the resolver at a different API root (tests, proxies).
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    async fn suggest(&self, company: &str) -> Result<Vec<Suggestion>> {
        let url = format!("{}/v1/companies/suggest", self.api_base);
        let response = self
            .client
            .get(url)
            .query(&[("query", company)])
            .send()
            .await
            .map_err(|e| LogofillError::Resolve(format!("autocomplete failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogofillError::Resolve(format!(
                "autocomplete returned HTTP {status}"
            )));
        }

        response.json().await.map_err(|e| {
            LogofillError::Resolve(format!("autocomplete response is not a suggestion list: {e}"))
        })
    }
}

#[async_trait]
impl ResolverStrategy for ClearbitResolver {
    async fn resolve(&self, company: &str) -> Result<StrategyOutcome> {
        let suggestions = self.suggest(company).await?;

        let Some(domain) = suggestions
            .into_iter()
            .next()
            .and_then(|suggestion| suggestion.domain)
        else {
            debug!(%company, "no usable autocomplete suggestion");
            return Ok(StrategyOutcome::NoMatch);
        };

        match clean_domain(&domain) {
            Some(domain) => Ok(StrategyOutcome::Found(logo_cdn_url(&domain))),
            None => {
                debug!(%company, %domain, "suggested domain did not normalize");
                Ok(StrategyOutcome::NoMatch)
            }
        }
    }

    fn name(&self) -> &'static str {
        "clearbit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn mock_resolver(server: &wiremock::MockServer) -> ClearbitResolver {
        ClearbitResolver::new().unwrap().with_base_url(server.uri())
    }

    #[tokio::test]
    async fn resolve_maps_first_suggestion_onto_cdn() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/v1/companies/suggest"))
            .and(wiremock::matchers::query_param("query", "Notion"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Notion", "domain": "notion.so", "logo": "https://logo.clearbit.com/notion.so"},
                {"name": "Notion Labs", "domain": "notionlabs.com"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = mock_resolver(&server).await;
        assert_eq!(
            resolver.resolve("Notion").await.unwrap(),
            StrategyOutcome::Found("https://logo.clearbit.com/notion.so".into())
        );
    }

    #[tokio::test]
    async fn suggestion_domains_are_normalized() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/v1/companies/suggest"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Example", "domain": "WWW.Example.COM"}
            ])))
            .mount(&server)
            .await;

        let resolver = mock_resolver(&server).await;
        assert_eq!(
            resolver.resolve("Example").await.unwrap(),
            StrategyOutcome::Found("https://logo.clearbit.com/example.com".into())
        );
    }

    #[tokio::test]
    async fn empty_suggestion_list_is_no_match() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/v1/companies/suggest"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let resolver = mock_resolver(&server).await;
        assert_eq!(
            resolver.resolve("Unknownco").await.unwrap(),
            StrategyOutcome::NoMatch
        );
    }

    #[tokio::test]
    async fn domainless_first_suggestion_is_no_match() {
        let server = wiremock::MockServer::start().await;

        // Only the top suggestion counts; later ones must not be consulted.
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/v1/companies/suggest"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Mystery"},
                {"name": "Mystery Inc", "domain": "mystery.io"}
            ])))
            .mount(&server)
            .await;

        let resolver = mock_resolver(&server).await;
        assert_eq!(
            resolver.resolve("Mystery").await.unwrap(),
            StrategyOutcome::NoMatch
        );
    }

    #[tokio::test]
    async fn error_status_is_an_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/v1/companies/suggest"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let resolver = mock_resolver(&server).await;
        let err = resolver.resolve("Notion").await.unwrap_err();
        assert!(err.to_string().contains("HTTP 503"));
    }
}
