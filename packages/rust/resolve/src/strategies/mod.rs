//! Resolution strategy trait and the ordered strategy chain.
//!
//! Each strategy turns a company name into at most one logo URL. The chain
//! tries them in configured order with first-success short-circuiting; a
//! transient provider failure only ends that attempt and falls through to
//! the next strategy, never past the per-record boundary.

mod alias;
mod brandfetch;
mod clearbit;
mod llm;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use logofill_shared::{AppConfig, Credentials, Result, StrategyKind};

pub use alias::AliasResolver;
pub use brandfetch::BrandfetchResolver;
pub use clearbit::ClearbitResolver;
pub use llm::LlmResolver;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Outcome of one resolution attempt.
///
/// `Err` on the strategy call means the provider was unreachable or answered
/// with something unparseable; [`StrategyOutcome::NoMatch`] means it answered
/// and had nothing for this name. Callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    /// A logo URL for the company.
    Found(String),
    /// The provider answered but had no match.
    NoMatch,
}

/// One way of turning a company name into a logo URL.
#[async_trait]
pub trait ResolverStrategy: Send + Sync {
    /// Attempt to resolve `company` to a logo URL.
    async fn resolve(&self, company: &str) -> Result<StrategyOutcome>;

    /// Strategy name for tracing and skip logs.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Strategies in priority order with first-success evaluation.
pub struct ResolverChain {
    strategies: Vec<Box<dyn ResolverStrategy>>,
}

impl ResolverChain {
    pub fn new(strategies: Vec<Box<dyn ResolverStrategy>>) -> Self {
        Self { strategies }
    }

    /// Build the chain described by config + credentials.
    ///
    /// Configured strategies whose credentials are absent are left out:
    /// silently for the LLM branch (its credential is optional), with a
    /// warning for Brandfetch (a likely misconfiguration).
    pub fn from_config(config: &AppConfig, credentials: &Credentials) -> Result<Self> {
        let mut strategies: Vec<Box<dyn ResolverStrategy>> = Vec::new();

        for kind in &config.resolver.strategies {
            match kind {
                StrategyKind::Alias => {
                    strategies.push(Box::new(AliasResolver::with_extra(&config.aliases)));
                }
                StrategyKind::Brandfetch => match &credentials.brandfetch {
                    Some(creds) => strategies.push(Box::new(BrandfetchResolver::new(
                        creds.api_key.clone(),
                        creds.client_id.clone(),
                    )?)),
                    None => {
                        warn!("brandfetch strategy configured but its credentials are not set, skipping")
                    }
                },
                StrategyKind::Clearbit => strategies.push(Box::new(ClearbitResolver::new()?)),
                StrategyKind::Llm => match &credentials.openai_key {
                    Some(key) => strategies.push(Box::new(LlmResolver::new(
                        key.clone(),
                        config.openai.model.clone(),
                    )?)),
                    None => debug!("no LLM credential set, fallback disabled"),
                },
            }
        }

        Ok(Self { strategies })
    }

    /// Resolve `company` through the chain. `None` means every strategy
    /// either had no match or failed transiently.
    pub async fn resolve(&self, company: &str) -> Option<String> {
        for strategy in &self.strategies {
            match strategy.resolve(company).await {
                Ok(StrategyOutcome::Found(url)) => {
                    info!(%company, strategy = strategy.name(), %url, "logo resolved");
                    return Some(url);
                }
                Ok(StrategyOutcome::NoMatch) => {
                    debug!(%company, strategy = strategy.name(), "no match, trying next");
                }
                Err(e) => {
                    warn!(%company, strategy = strategy.name(), error = %e, "attempt failed, trying next");
                }
            }
        }
        None
    }

    /// Names of the active strategies, in order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
