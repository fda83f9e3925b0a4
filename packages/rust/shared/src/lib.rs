//! Shared types, error model, and configuration for Logofill.
//!
//! This crate is the foundation depended on by all other Logofill crates.
//! It provides:
//! - [`LogofillError`], the unified error type
//! - Domain types ([`RunId`], [`SkipReason`])
//! - Configuration ([`AppConfig`], [`EnrichOptions`], [`Credentials`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AirtableConfig, AppConfig, BrandfetchConfig, BrandfetchCredentials, Credentials,
    EnrichOptions, FieldsConfig, OpenAiConfig, ResolverConfig, SkipRule, StrategyKind,
    WriteConfig, config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{LogofillError, Result};
pub use types::{RunId, SkipReason};
