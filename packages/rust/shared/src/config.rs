//! Application configuration for Logofill.
//!
//! User config lives at `~/.logofill/logofill.toml`.
//! CLI flags override config file values, which override defaults.
//! Secrets never live in the file: each provider section names the
//! environment variable its credential is read from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LogofillError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "logofill.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".logofill";

// ---------------------------------------------------------------------------
// Config structs (matching logofill.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Record field mapping and skip behavior.
    #[serde(default)]
    pub fields: FieldsConfig,

    /// Batch write pacing.
    #[serde(default)]
    pub write: WriteConfig,

    /// Resolution strategy order.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Record store (Airtable) settings.
    #[serde(default)]
    pub airtable: AirtableConfig,

    /// Brandfetch settings.
    #[serde(default)]
    pub brandfetch: BrandfetchConfig,

    /// LLM fallback settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Extra `name = "domain"` alias entries, merged over the built-ins.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// `[fields]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsConfig {
    /// Field holding the company/tool name. Some bases use `Company`.
    #[serde(default = "default_name_field")]
    pub name: String,

    /// Field receiving the resolved logo URL.
    #[serde(default = "default_logo_url_field")]
    pub logo_url: String,

    /// Attachment field receiving the logo file reference.
    #[serde(default = "default_logo_file_field")]
    pub logo_file: String,

    /// How "already enriched" is decided for the two target fields.
    #[serde(default)]
    pub skip_rule: SkipRule,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            name: default_name_field(),
            logo_url: default_logo_url_field(),
            logo_file: default_logo_file_field(),
            skip_rule: SkipRule::default(),
        }
    }
}

fn default_name_field() -> String {
    "Name".into()
}
fn default_logo_url_field() -> String {
    "Logo URL".into()
}
fn default_logo_file_field() -> String {
    "Logo File".into()
}

/// Skip condition for records that may already carry a logo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipRule {
    /// Skip when the target field key is present at all.
    #[default]
    Presence,
    /// Skip only when the target field holds a non-empty value.
    Truthy,
}

/// `[write]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteConfig {
    /// Updates per batch-update call. The provider caps this at 10.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between consecutive batch flushes, in milliseconds.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            pause_ms: default_pause_ms(),
        }
    }
}

fn default_batch_size() -> usize {
    10
}
fn default_pause_ms() -> u64 {
    1000
}

/// `[resolver]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Strategies tried in order; first success wins.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyKind>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategies: default_strategies(),
        }
    }
}

fn default_strategies() -> Vec<StrategyKind> {
    vec![
        StrategyKind::Alias,
        StrategyKind::Brandfetch,
        StrategyKind::Clearbit,
        StrategyKind::Llm,
    ]
}

/// One resolution strategy kind, as named in config and CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Static name-to-domain alias table.
    Alias,
    /// Brandfetch search + brand detail.
    Brandfetch,
    /// Clearbit autocomplete + logo CDN.
    Clearbit,
    /// LLM domain lookup (only active when its credential is set).
    Llm,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alias => "alias",
            Self::Brandfetch => "brandfetch",
            Self::Clearbit => "clearbit",
            Self::Llm => "llm",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = LogofillError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alias" => Ok(Self::Alias),
            "brandfetch" => Ok(Self::Brandfetch),
            "clearbit" => Ok(Self::Clearbit),
            "llm" => Ok(Self::Llm),
            other => Err(LogofillError::config(format!(
                "unknown resolver strategy: {other} (expected alias, brandfetch, clearbit, or llm)"
            ))),
        }
    }
}

/// `[airtable]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableConfig {
    /// Env var holding the personal access token (never the token itself).
    #[serde(default = "default_airtable_token_env")]
    pub token_env: String,

    /// Env var holding the base identifier.
    #[serde(default = "default_airtable_base_env")]
    pub base_id_env: String,

    /// Env var holding the table name.
    #[serde(default = "default_airtable_table_env")]
    pub table_env: String,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            token_env: default_airtable_token_env(),
            base_id_env: default_airtable_base_env(),
            table_env: default_airtable_table_env(),
        }
    }
}

fn default_airtable_token_env() -> String {
    "AIRTABLE_TOKEN".into()
}
fn default_airtable_base_env() -> String {
    "AIRTABLE_BASE_ID".into()
}
fn default_airtable_table_env() -> String {
    "AIRTABLE_TABLE".into()
}

/// `[brandfetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandfetchConfig {
    /// Env var holding the API key.
    #[serde(default = "default_brandfetch_key_env")]
    pub api_key_env: String,

    /// Env var holding the search client id.
    #[serde(default = "default_brandfetch_client_env")]
    pub client_id_env: String,
}

impl Default for BrandfetchConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_brandfetch_key_env(),
            client_id_env: default_brandfetch_client_env(),
        }
    }
}

fn default_brandfetch_key_env() -> String {
    "BRANDFETCH_KEY".into()
}
fn default_brandfetch_client_env() -> String {
    "BRANDFETCH_CLIENT_ID".into()
}

/// `[openai]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Env var holding the API key. Unset disables the LLM fallback.
    #[serde(default = "default_openai_key_env")]
    pub api_key_env: String,

    /// Model used for domain lookups.
    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_openai_key_env(),
            model: default_openai_model(),
        }
    }
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_openai_model() -> String {
    "gpt-4o-mini".into()
}

// ---------------------------------------------------------------------------
// Enrich options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime enrichment options, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Field mapping and skip rule.
    pub fields: FieldsConfig,
    /// Updates per batch flush.
    pub batch_size: usize,
    /// Pause between flushes in milliseconds.
    pub pause_ms: u64,
    /// Stop scanning after this many records.
    pub limit: Option<usize>,
    /// Log would-be flushes instead of writing.
    pub dry_run: bool,
}

impl From<&AppConfig> for EnrichOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            fields: config.fields.clone(),
            batch_size: config.write.batch_size,
            pause_ms: config.write.pause_ms,
            limit: None,
            dry_run: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Credentials (read from the environment once per run)
// ---------------------------------------------------------------------------

/// Credentials for one Brandfetch account.
#[derive(Debug, Clone)]
pub struct BrandfetchCredentials {
    pub api_key: String,
    pub client_id: String,
}

/// All credentials for a run, read from the env vars named in [`AppConfig`].
///
/// Built explicitly at run start instead of living in process-wide globals,
/// so a run carries exactly the credentials it was constructed with.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Record store personal access token.
    pub airtable_token: String,
    /// Record store base identifier.
    pub base_id: String,
    /// Table to enrich.
    pub table: String,
    /// Brandfetch key pair, if both env vars are set.
    pub brandfetch: Option<BrandfetchCredentials>,
    /// LLM API key, if set.
    pub openai_key: Option<String>,
}

impl Credentials {
    /// Read all credentials from the environment. The record store trio is
    /// required; provider credentials are optional and gate their strategies.
    pub fn from_env(config: &AppConfig) -> Result<Self> {
        let airtable_token = require_env(&config.airtable.token_env)?;
        let base_id = require_env(&config.airtable.base_id_env)?;
        let table = require_env(&config.airtable.table_env)?;

        let brandfetch = match (
            optional_env(&config.brandfetch.api_key_env),
            optional_env(&config.brandfetch.client_id_env),
        ) {
            (Some(api_key), Some(client_id)) => Some(BrandfetchCredentials { api_key, client_id }),
            _ => None,
        };

        let openai_key = optional_env(&config.openai.api_key_env);

        Ok(Self {
            airtable_token,
            base_id,
            table,
            brandfetch,
            openai_key,
        })
    }
}

fn require_env(var_name: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(LogofillError::config(format!(
            "required credential not found. Set the {var_name} environment variable."
        ))),
    }
}

fn optional_env(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.logofill/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LogofillError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.logofill/logofill.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LogofillError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| LogofillError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| LogofillError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LogofillError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LogofillError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
