//! Brandfetch resolution: name search, then brand detail, then logo pick.
//!
//! Two calls per attempt. The search endpoint is keyed by a client id query
//! parameter and answers a hit list; the brand endpoint takes the hit's
//! domain with bearer auth and answers the brand's logo assets.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use logofill_shared::{LogofillError, Result};

use super::{ResolverStrategy, StrategyOutcome};

/// Public REST root for the Brandfetch v2 API.
const DEFAULT_API_BASE: &str = "https://api.brandfetch.io/v2";

/// Timeout in seconds for each Brandfetch call.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One entry of the search endpoint's hit list.
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    domain: Option<String>,
}

/// Brand detail payload, reduced to the logo assets we read.
#[derive(Debug, Deserialize)]
struct Brand {
    #[serde(default)]
    logos: Vec<LogoAsset>,
}

#[derive(Debug, Deserialize)]
struct LogoAsset {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    formats: Vec<LogoFormat>,
}

#[derive(Debug, Deserialize)]
struct LogoFormat {
    #[serde(default)]
    format: String,
    src: String,
}

/// Pick one representative asset URL from a brand's logo list: the first
/// asset typed `logo` or `icon`, preferring its `svg` format, else its first
/// listed format. An asset without formats yields nothing.
fn best_logo(brand: &Brand) -> Option<&str> {
    let asset = brand
        .logos
        .iter()
        .find(|asset| asset.kind == "logo" || asset.kind == "icon")?;

    let format = asset
        .formats
        .iter()
        .find(|format| format.format == "svg")
        .or_else(|| asset.formats.first())?;

    Some(format.src.as_str())
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Searches Brandfetch by name, then pulls the matched brand's logo list.
pub struct BrandfetchResolver {
    client: Client,
    api_base: String,
    api_key: String,
    client_id: String,
}

impl BrandfetchResolver {
    pub fn new(api_key: impl Into<String>, client_id: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LogofillError::Resolve(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.into(),
            api_key: api_key.into(),
            client_id: client_id.into(),
        })
    }

    /// Point the resolver at a different API root (tests, proxies).
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn endpoint(&self, kind: &str, value: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| LogofillError::Resolve(format!("invalid API base {}: {e}", self.api_base)))?;
        url.path_segments_mut()
            .map_err(|_| {
                LogofillError::Resolve(format!("API base cannot carry paths: {}", self.api_base))
            })?
            .pop_if_empty()
            .push(kind)
            .push(value);
        Ok(url)
    }

    /// First search hit's domain. The endpoint answers `[]` on no hit and an
    /// error object on bad input; only a non-empty hit list with a domain
    /// counts.
    async fn search_domain(&self, company: &str) -> Result<Option<String>> {
        let url = self.endpoint("search", company)?;
        let response = self
            .client
            .get(url)
            .query(&[("c", self.client_id.as_str())])
            .send()
            .await
            .map_err(|e| LogofillError::Resolve(format!("brand search failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogofillError::Resolve(format!(
                "brand search returned HTTP {status}"
            )));
        }

        let hits: Vec<SearchHit> = response.json().await.map_err(|e| {
            LogofillError::Resolve(format!("brand search response is not a hit list: {e}"))
        })?;

        Ok(hits.into_iter().next().and_then(|hit| hit.domain))
    }

    async fn fetch_brand(&self, domain: &str) -> Result<Brand> {
        let url = self.endpoint("brands", domain)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| LogofillError::Resolve(format!("brand detail failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogofillError::Resolve(format!(
                "brand detail returned HTTP {status}"
            )));
        }

        response.json().await.map_err(|e| {
            LogofillError::Resolve(format!("brand detail response is not valid JSON: {e}"))
        })
    }
}

#[async_trait]
impl ResolverStrategy for BrandfetchResolver {
    async fn resolve(&self, company: &str) -> Result<StrategyOutcome> {
        let Some(domain) = self.search_domain(company).await? else {
            debug!(%company, "no brand search hit");
            return Ok(StrategyOutcome::NoMatch);
        };

        let brand = self.fetch_brand(&domain).await?;
        match best_logo(&brand) {
            Some(src) => Ok(StrategyOutcome::Found(src.to_string())),
            None => {
                debug!(%company, %domain, "brand has no usable logo asset");
                Ok(StrategyOutcome::NoMatch)
            }
        }
    }

    fn name(&self) -> &'static str {
        "brandfetch"
    }
}
