//! Company-name to logo-URL resolution.
//!
//! This crate provides:
//! - [`strategies`]: the individual resolution strategies (alias table,
//!   Brandfetch search, Clearbit autocomplete, LLM fallback)
//! - [`ResolverChain`]: ordered first-success composition of strategies
//! - [`domain`]: registrable-domain cleaning and CDN templating helpers

pub mod domain;
pub mod strategies;

/// User-Agent string for resolver requests.
pub(crate) const USER_AGENT: &str = concat!("Logofill/", env!("CARGO_PKG_VERSION"));

pub use domain::{LOGO_CDN_BASE, clean_domain, extract_domain_token, logo_cdn_url};
pub use strategies::{
    AliasResolver, BrandfetchResolver, ClearbitResolver, LlmResolver, ResolverChain,
    ResolverStrategy, StrategyOutcome,
};
