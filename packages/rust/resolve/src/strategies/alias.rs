//! Static alias table: exact company name to known domain.
//!
//! Covers names the search providers routinely mangle: short tool names,
//! products whose brand lives on a different domain than the name suggests.
//! Entirely offline; a hit never issues an HTTP request.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use logofill_shared::Result;

use super::{ResolverStrategy, StrategyOutcome};
use crate::domain::logo_cdn_url;

/// Names whose domains are known ahead of time. Values are used verbatim,
/// so subdomain entries like `code.visualstudio.com` are allowed.
const BUILT_IN_ALIASES: &[(&str, &str)] = &[
    ("AWS", "aws.amazon.com"),
    ("Airflow", "airflow.apache.org"),
    ("Anthropic AI Claude", "anthropic.com"),
    ("ChatGPT", "openai.com"),
    ("Cursor", "cursor.com"),
    ("Google Workspace", "workspace.google.com"),
    ("Hugging Face", "huggingface.co"),
    ("Jupyter Notebook", "jupyter.org"),
    ("Khan Academy", "khanacademy.org"),
    ("LangChain AI", "langchain.com"),
    ("Lovable", "lovable.dev"),
    ("Meta Business Suite", "business.facebook.com"),
    ("Shippo", "goshippo.com"),
    ("Stata", "stata.com"),
    ("VS Code", "code.visualstudio.com"),
    ("dbt", "dbtlabs.com"),
    ("v0", "v0.dev"),
];

/// Exact-name alias lookup; first strategy in the default chain.
pub struct AliasResolver {
    aliases: BTreeMap<String, String>,
}

impl AliasResolver {
    /// Built-in table only.
    pub fn new() -> Self {
        Self::with_extra(&BTreeMap::new())
    }

    /// Built-in table with config-supplied entries merged over it
    /// (config wins on collision).
    pub fn with_extra(extra: &BTreeMap<String, String>) -> Self {
        let mut aliases: BTreeMap<String, String> = BUILT_IN_ALIASES
            .iter()
            .map(|(name, domain)| ((*name).to_string(), (*domain).to_string()))
            .collect();
        for (name, domain) in extra {
            aliases.insert(name.clone(), domain.clone());
        }
        Self { aliases }
    }

    /// The effective table, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(name, domain)| (name.as_str(), domain.as_str()))
    }
}

impl Default for AliasResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResolverStrategy for AliasResolver {
    async fn resolve(&self, company: &str) -> Result<StrategyOutcome> {
        match self.aliases.get(company) {
            Some(domain) => {
                debug!(%company, %domain, "alias hit");
                Ok(StrategyOutcome::Found(logo_cdn_url(domain)))
            }
            None => Ok(StrategyOutcome::NoMatch),
        }
    }

    fn name(&self) -> &'static str {
        "alias"
    }
}
