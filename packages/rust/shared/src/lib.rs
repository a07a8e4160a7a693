//! Shared types, error model, and configuration for LeadGen.
//!
//! This crate is the foundation depended on by all other LeadGen crates.
//! It provides:
//! - [`LeadGenError`] — the unified error type
//! - Domain types ([`CompanyRecord`], [`LeadRow`], [`OutreachMessage`], [`SearchParams`])
//! - Configuration ([`AppConfig`] and its sections, config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ApolloConfig, AppConfig, DefaultsConfig, OpenAiConfig, ScrapeConfig, SenderConfig, config_dir,
    config_file_path, init_config, init_config_at, load_config, load_config_from, read_api_key,
};
pub use error::{LeadGenError, Result};
pub use types::{CompanyRecord, LEAD_COLUMNS, LeadRow, OutreachMessage, SearchParams};
