//! Application configuration for nodedocs.
//!
//! User config lives at `~/.nodedocs/nodedocs.toml`.
//! CLI flags override config file values, which override defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NodeDocsError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "nodedocs.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".nodedocs";

// ---------------------------------------------------------------------------
// Config structs (matching nodedocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the outline pages come from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Localized and reference content repositories.
    #[serde(default)]
    pub repos: ReposConfig,

    /// Generated site layout.
    #[serde(default)]
    pub output: OutputConfig,

    /// Extra type links (`name = "url"`) on top of the built-in table.
    #[serde(default)]
    pub types: BTreeMap<String, String>,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URI of the remote API docs; page names are resolved against it.
    #[serde(default = "default_base_uri")]
    pub base_uri: String,

    /// Selector for the top-level menu anchors on the base page.
    #[serde(default = "default_menu_selector")]
    pub menu_selector: String,

    /// Selector for the outline list on each page.
    #[serde(default = "default_toc_selector")]
    pub toc_selector: String,

    /// HTTP request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_uri: default_base_uri(),
            menu_selector: default_menu_selector(),
            toc_selector: default_toc_selector(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_uri() -> String {
    "http://nodejs.cn/api/".into()
}
fn default_menu_selector() -> String {
    "#apicontent li a".into()
}
fn default_toc_selector() -> String {
    "#toc > ul".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[repos]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReposConfig {
    /// Git URL of the localized fragment repository.
    #[serde(default = "default_localized_url")]
    pub localized_url: String,

    /// Checkout directory of the localized fragments (the content root).
    #[serde(default = "default_localized_dir")]
    pub localized_dir: PathBuf,

    /// Git URL of the upstream (English) repository.
    #[serde(default = "default_reference_url")]
    pub reference_url: String,

    /// Checkout directory of the upstream repository.
    #[serde(default = "default_reference_dir")]
    pub reference_dir: PathBuf,

    /// API markdown directory inside the upstream checkout.
    #[serde(default = "default_reference_api_dir")]
    pub reference_api_dir: PathBuf,
}

impl Default for ReposConfig {
    fn default() -> Self {
        Self {
            localized_url: default_localized_url(),
            localized_dir: default_localized_dir(),
            reference_url: default_reference_url(),
            reference_dir: default_reference_dir(),
            reference_api_dir: default_reference_api_dir(),
        }
    }
}

fn default_localized_url() -> String {
    "https://github.com/nodejscn/node-api-cn.git".into()
}
fn default_localized_dir() -> PathBuf {
    PathBuf::from("docs").join("cn")
}
fn default_reference_url() -> String {
    "https://github.com/nodejs/node.git".into()
}
fn default_reference_dir() -> PathBuf {
    PathBuf::from("docs").join("en")
}
fn default_reference_api_dir() -> PathBuf {
    PathBuf::from("doc").join("api")
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory of the generated site.
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Public URL prefix of every page (also its directory under `public_dir`).
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Search index file name, relative to `public_dir`.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Stylesheet href written into every page.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,

    /// `lang` attribute of the generated pages.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Prefix of the description of top-level menu index entries.
    #[serde(default = "default_menu_description_prefix")]
    pub menu_description_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            url_prefix: default_url_prefix(),
            index_file: default_index_file(),
            stylesheet: default_stylesheet(),
            lang: default_lang(),
            menu_description_prefix: default_menu_description_prefix(),
        }
    }
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}
fn default_url_prefix() -> String {
    "docs/".into()
}
fn default_index_file() -> String {
    "indexes.json".into()
}
fn default_stylesheet() -> String {
    "../css/doc.css".into()
}
fn default_lang() -> String {
    "zh_CN".into()
}
fn default_menu_description_prefix() -> String {
    "目录: ".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.nodedocs/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| NodeDocsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.nodedocs/nodedocs.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| NodeDocsError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| NodeDocsError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| NodeDocsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| NodeDocsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| NodeDocsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
