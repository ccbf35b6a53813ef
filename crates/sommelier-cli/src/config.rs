//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sommelier_advisor::SelectionConfig;
use sommelier_inventory::{CatalogSource, ColumnHints, FileSource, SheetSource};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the inventory lives
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Model settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Candidate limits
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Inventory location. The first of `file`, `url`, `sheet_id` that is set wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Google Sheets document id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,

    /// Any URL serving CSV
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Local CSV file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Download timeout in seconds for `url` and `sheet_id`
    #[serde(default = "default_catalog_timeout_secs")]
    pub timeout_secs: u64,

    /// Header names recognised in the sheet
    #[serde(default)]
    pub columns: ColumnHints,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sheet_id: None,
            url: None,
            file: None,
            timeout_secs: default_catalog_timeout_secs(),
            columns: ColumnHints::default(),
        }
    }
}

/// Model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Gemini model name
    #[serde(default = "default_model")]
    pub name: String,

    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Contents of `secrets.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    /// Gemini API key
    #[serde(rename = "GEMINI_API_KEY", default)]
    pub gemini_api_key: Option<String>,
}

impl Config {
    /// Directory holding config, secrets and history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".sommelier"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Secrets file kept beside a configuration file.
    pub fn secrets_path_for(config_path: &Path) -> PathBuf {
        config_path.with_file_name("secrets.toml")
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.selection.validate().map_err(CliError::Config)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Serialize to TOML text.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Read the inventory from a Google sheet only.
    pub fn use_sheet(&mut self, sheet_id: impl Into<String>) {
        self.catalog.sheet_id = Some(sheet_id.into());
        self.catalog.url = None;
        self.catalog.file = None;
    }

    /// Read the inventory from a local file only.
    pub fn use_file(&mut self, path: impl Into<PathBuf>) {
        self.catalog.file = Some(path.into());
        self.catalog.url = None;
        self.catalog.sheet_id = None;
    }

    /// Build the inventory source named by the catalog section.
    pub fn catalog_source(&self) -> Result<CatalogSource> {
        let hints = self.catalog.columns.clone();

        if let Some(file) = &self.catalog.file {
            return Ok(FileSource::new(file.clone(), hints).into());
        }
        let timeout_secs = self.catalog.timeout_secs;
        if let Some(url) = &self.catalog.url {
            return Ok(SheetSource::new(url.clone(), hints)?
                .with_timeout_secs(timeout_secs)?
                .into());
        }
        if let Some(sheet_id) = &self.catalog.sheet_id {
            return Ok(SheetSource::google_sheet(sheet_id, hints)?
                .with_timeout_secs(timeout_secs)?
                .into());
        }

        Err(CliError::Config(
            "No inventory configured. Use 'sommelier config set-sheet <ID>' or 'config set-file <PATH>'"
                .to_string(),
        ))
    }
}

impl Secrets {
    /// Load secrets, or none if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }
}

/// Pick the API key: flag or environment first, then the secrets file.
///
/// A blank flag or environment value does not hide the secrets file.
/// Missing, blank and whitespace-containing keys are rejected.
pub fn resolve_api_key(from_args: Option<&str>, secrets: &Secrets) -> Result<String> {
    let key = non_blank(from_args)
        .or_else(|| non_blank(secrets.gemini_api_key.as_deref()))
        .ok_or_else(|| {
            CliError::Config(
                "GEMINI_API_KEY is not set. Pass --api-key, set the environment variable, \
                 or add it to secrets.toml next to the config file"
                    .to_string(),
            )
        })?;

    if key.contains(char::is_whitespace) {
        return Err(CliError::Config(
            "GEMINI_API_KEY contains whitespace".to_string(),
        ));
    }

    Ok(key.to_string())
}

/// Trimmed value, or `None` when absent or blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_model() -> String {
    sommelier_llm::DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    sommelier_llm::DEFAULT_ENDPOINT.to_string()
}

fn default_catalog_timeout_secs() -> u64 {
    sommelier_inventory::DEFAULT_TIMEOUT_SECS
}

fn default_timeout_secs() -> u64 {
    sommelier_llm::gemini::DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.model.name, "gemini-2.0-flash-exp");
        assert_eq!(config.model.timeout_secs, 120);
        assert_eq!(config.selection.full_limit, 100);
        assert!(config.catalog.sheet_id.is_none());
    }

    #[test]
    fn test_catalog_timeout() {
        let config: Config = toml::from_str("[catalog]\nsheet_id = \"abc\"\n").unwrap();
        assert_eq!(config.catalog.timeout_secs, 30);
        assert!(config.catalog_source().is_ok());

        let config: Config =
            toml::from_str("[catalog]\nsheet_id = \"abc\"\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(config.catalog_source(), Err(CliError::Inventory(_))));

        let config: Config =
            toml::from_str("[catalog]\nurl = \"http://localhost/a.csv\"\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.catalog.timeout_secs, 5);
        assert!(config.catalog_source().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.use_sheet("sheet-123");
        config.model.name = "gemini-1.5-pro".to_string();
        config.selection.fallback_limit = 20;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.catalog.sheet_id.as_deref(), Some("sheet-123"));
        assert_eq!(loaded.model.name, "gemini-1.5-pro");
        assert_eq!(loaded.selection.fallback_limit, 20);
        assert_eq!(loaded.catalog.columns, ColumnHints::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[catalog]\nfile = \"stock.csv\"\n\n[catalog.columns]\nprice = [\"단가\"]\n\n[settings]\ncolor = false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.catalog.file, Some(PathBuf::from("stock.csv")));
        assert_eq!(config.catalog.columns.price, vec!["단가".to_string()]);
        assert_eq!(config.catalog.columns.name, ColumnHints::default().name);
        assert!(!config.settings.color);
        assert_eq!(config.model.name, "gemini-2.0-flash-exp");
    }

    #[test]
    fn test_invalid_selection_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[selection]\nfull_limit = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_catalog_source_precedence() {
        let mut config = Config::default();
        assert!(matches!(config.catalog_source(), Err(CliError::Config(_))));

        config.catalog.sheet_id = Some("abc".to_string());
        assert!(matches!(config.catalog_source().unwrap(), CatalogSource::Sheet(_)));

        config.catalog.file = Some(PathBuf::from("stock.csv"));
        assert!(matches!(config.catalog_source().unwrap(), CatalogSource::File(_)));

        config.use_sheet("def");
        let source = config.catalog_source().unwrap();
        assert!(source.location().contains("/def/gviz/"));
    }

    #[test]
    fn test_api_key_resolution() {
        let secrets = Secrets {
            gemini_api_key: Some("from-file".to_string()),
        };
        assert_eq!(resolve_api_key(Some("from-flag"), &secrets).unwrap(), "from-flag");
        assert_eq!(resolve_api_key(None, &secrets).unwrap(), "from-file");
        assert_eq!(resolve_api_key(Some("  padded  "), &secrets).unwrap(), "padded");
    }

    #[test]
    fn test_blank_flag_falls_through_to_secrets() {
        let secrets = Secrets {
            gemini_api_key: Some("from-file".to_string()),
        };
        assert_eq!(resolve_api_key(Some(""), &secrets).unwrap(), "from-file");
        assert_eq!(resolve_api_key(Some("   "), &secrets).unwrap(), "from-file");

        let blank_file = Secrets {
            gemini_api_key: Some("  ".to_string()),
        };
        assert!(matches!(resolve_api_key(Some(""), &blank_file), Err(CliError::Config(_))));
    }

    #[test]
    fn test_secrets_path_sits_beside_config() {
        assert_eq!(
            Config::secrets_path_for(Path::new("/tmp/sommelier/config.toml")),
            PathBuf::from("/tmp/sommelier/secrets.toml")
        );
    }

    #[test]
    fn test_bad_api_keys() {
        let none = Secrets::default();
        assert!(matches!(resolve_api_key(None, &none), Err(CliError::Config(_))));
        assert!(matches!(resolve_api_key(Some("   "), &none), Err(CliError::Config(_))));
        assert!(matches!(resolve_api_key(Some("two words"), &none), Err(CliError::Config(_))));
    }

    #[test]
    fn test_secrets_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secrets.toml");
        fs::write(&path, "GEMINI_API_KEY = \"abc123\"\n").unwrap();

        let secrets = Secrets::load_from(&path).unwrap();
        assert_eq!(secrets.gemini_api_key.as_deref(), Some("abc123"));
        assert!(Secrets::load_from(&dir.path().join("none.toml")).unwrap().gemini_api_key.is_none());
    }
}
