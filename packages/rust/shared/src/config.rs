//! Application configuration for LeadGen.
//!
//! User config lives at `~/.leadgen/leadgen.toml`.
//! CLI flags override config file values, which override defaults.
//! Credentials are never stored in the file, only the names of the
//! environment variables that hold them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LeadGenError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "leadgen.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".leadgen";

// ---------------------------------------------------------------------------
// Config structs (matching leadgen.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Defaults for the interactive search prompts.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Company directory (Apollo) settings.
    #[serde(default)]
    pub apollo: ApolloConfig,

    /// Generative text service settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Website fetch and extraction settings.
    #[serde(default)]
    pub scrape: ScrapeConfig,

    /// Who the outreach emails are written as.
    #[serde(default)]
    pub sender: SenderConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Industry keyword tags.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Employee-count ranges, e.g. `"50,200"`.
    #[serde(default = "default_size_ranges")]
    pub size_ranges: Vec<String>,

    /// Location filters.
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,

    /// Number of companies to request.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Where the CSV is written.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            size_ranges: default_size_ranges(),
            locations: default_locations(),
            limit: default_limit(),
            output: default_output(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    vec!["software".into()]
}
fn default_size_ranges() -> Vec<String> {
    vec!["50,200".into()]
}
fn default_locations() -> Vec<String> {
    vec!["Bangalore".into()]
}
fn default_limit() -> u32 {
    10
}
fn default_output() -> String {
    "final_leads.csv".into()
}

/// `[apollo]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApolloConfig {
    /// Name of the env var holding the API key.
    #[serde(default = "default_apollo_key_env")]
    pub api_key_env: String,

    /// API origin; the search path is appended.
    #[serde(default = "default_apollo_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_ten")]
    pub timeout_secs: u64,
}

impl Default for ApolloConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_apollo_key_env(),
            base_url: default_apollo_base_url(),
            timeout_secs: default_ten(),
        }
    }
}

fn default_apollo_key_env() -> String {
    "APOLLO_API_KEY".into()
}
fn default_apollo_base_url() -> String {
    "https://api.apollo.io".into()
}
fn default_ten() -> u64 {
    10
}

/// `[openai]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Name of the env var holding the API key. Unset means stub mode.
    #[serde(default = "default_openai_key_env")]
    pub api_key_env: String,

    /// API root; `/chat/completions` is appended.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Chat model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_openai_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_openai_key_env(),
            base_url: default_openai_base_url(),
            model: default_model(),
            timeout_secs: default_openai_timeout(),
        }
    }
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_openai_timeout() -> u64 {
    60
}

/// `[scrape]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// User-Agent sent with every website fetch.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Fetch timeout in seconds.
    #[serde(default = "default_ten")]
    pub timeout_secs: u64,

    /// Pause after every successful fetch, in milliseconds.
    #[serde(default = "default_politeness_delay")]
    pub politeness_delay_ms: u64,

    /// Number of `<p>` elements kept from each page.
    #[serde(default = "default_max_paragraphs")]
    pub max_paragraphs: usize,

    /// Number of news/update snippets kept from each page.
    #[serde(default = "default_max_news")]
    pub max_news_snippets: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_ten(),
            politeness_delay_ms: default_politeness_delay(),
            max_paragraphs: default_max_paragraphs(),
            max_news_snippets: default_max_news(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("LeadGenBot/", env!("CARGO_PKG_VERSION"), " (+leads@leadgenie.example)").into()
}
fn default_politeness_delay() -> u64 {
    1_500
}
fn default_max_paragraphs() -> usize {
    20
}
fn default_max_news() -> usize {
    3
}

/// `[sender]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderConfig {
    #[serde(default = "default_sender_name")]
    pub name: String,

    #[serde(default = "default_sender_role")]
    pub role: String,

    #[serde(default = "default_sender_company")]
    pub company: String,

    #[serde(default = "default_sender_email")]
    pub email: String,

    /// What the sender sells, in a few words.
    #[serde(default = "default_offering")]
    pub offering: String,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            name: default_sender_name(),
            role: default_sender_role(),
            company: default_sender_company(),
            email: default_sender_email(),
            offering: default_offering(),
        }
    }
}

fn default_sender_name() -> String {
    "The LeadGenie Team".into()
}
fn default_sender_role() -> String {
    "Founder & CEO".into()
}
fn default_sender_company() -> String {
    "LeadGenie".into()
}
fn default_sender_email() -> String {
    "hello@leadgenie.example".into()
}
fn default_offering() -> String {
    "hardware and computer solutions".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.leadgen/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| LeadGenError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.leadgen/leadgen.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| LeadGenError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| LeadGenError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path()?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write a default config file to `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| LeadGenError::io(dir, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| LeadGenError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| LeadGenError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}

/// Read a credential from the named env var. Empty values count as missing.
pub fn read_api_key(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.trim().is_empty() => Some(val.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("APOLLO_API_KEY"));
        assert!(toml_str.contains("OPENAI_API_KEY"));
        assert!(toml_str.contains("final_leads.csv"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.limit, 10);
        assert_eq!(parsed.scrape.politeness_delay_ms, 1_500);
        assert_eq!(parsed.openai.model, "gpt-4o-mini");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
keywords = ["fintech", "payments"]
limit = 25

[sender]
company = "Acme Hardware"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.keywords, vec!["fintech", "payments"]);
        assert_eq!(config.defaults.limit, 25);
        assert_eq!(config.defaults.size_ranges, vec!["50,200"]);
        assert_eq!(config.sender.company, "Acme Hardware");
        assert_eq!(config.sender.role, "Founder & CEO");
        assert_eq!(config.scrape.max_paragraphs, 20);
    }

    #[test]
    fn missing_api_key_reads_as_none() {
        // Unique name so parallel tests never collide.
        assert!(read_api_key("LEADGEN_TEST_NONEXISTENT_KEY_12345").is_none());
    }

    #[test]
    fn load_config_from_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("leadgen.toml");
        std::fs::write(&path, "[defaults\nlimit = ").expect("write");

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn init_config_at_writes_loadable_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("leadgen.toml");

        init_config_at(&path).expect("init");
        let config = load_config_from(&path).expect("load");
        assert_eq!(config.apollo.api_key_env, "APOLLO_API_KEY");
        assert_eq!(config.defaults.output, "final_leads.csv");
    }
}
