//! Startup wiring: config, inventory source and model client.

use crate::cli::Cli;
use crate::config::{non_blank, resolve_api_key, Config, Secrets};
use crate::error::Result;
use crate::output::Formatter;
use sommelier_advisor::Advisor;
use sommelier_inventory::{CachedSource, CatalogSource};
use sommelier_llm::GeminiProvider;
use std::path::PathBuf;
use tracing::debug;

/// Inventory source used by the binary, fetched at most once per process
pub type Source = CachedSource<CatalogSource>;

/// Advisor used by the binary
pub type LiveAdvisor = Advisor<Source, GeminiProvider>;

/// Everything resolved before the first command runs
pub struct Session {
    /// Effective configuration (file plus flag overrides)
    pub config: Config,
    /// Where the configuration was read from
    pub config_path: PathBuf,
    /// Output formatter
    pub formatter: Formatter,
    api_key: Option<String>,
}

impl Session {
    /// Load configuration and apply command-line overrides.
    ///
    /// A missing config file is created with defaults on first run.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::path()?,
        };

        let mut config = if config_path.exists() {
            Config::load_from(&config_path)?
        } else {
            let config = Config::default();
            if let Err(e) = config.save_to(&config_path) {
                debug!("Could not write default config to {}: {}", config_path.display(), e);
            }
            config
        };

        if let Some(sheet_id) = &cli.sheet_id {
            config.use_sheet(sheet_id.clone());
        }
        if let Some(file) = &cli.inventory_file {
            config.use_file(file.clone());
        }

        let format = cli
            .format
            .map(Into::into)
            .unwrap_or(config.settings.format);
        let color_enabled = !cli.no_color && config.settings.color;

        Ok(Self {
            formatter: Formatter::new(format, color_enabled),
            config,
            config_path,
            api_key: cli.api_key.clone(),
        })
    }

    /// Inventory source named by the configuration, wrapped in a session cache.
    pub fn source(&self) -> Result<Source> {
        Ok(CachedSource::new(self.config.catalog_source()?))
    }

    /// Gemini client; fails when no usable API key is available.
    pub fn provider(&self) -> Result<GeminiProvider> {
        let secrets = match non_blank(self.api_key.as_deref()) {
            Some(_) => Secrets::default(),
            None => Secrets::load_from(&Config::secrets_path_for(&self.config_path))?,
        };
        let api_key = resolve_api_key(self.api_key.as_deref(), &secrets)?;

        let model = &self.config.model;
        let provider = GeminiProvider::new(api_key, model.name.clone())?
            .with_endpoint(model.endpoint.clone())
            .with_timeout_secs(model.timeout_secs)?;
        Ok(provider)
    }

    /// Advisor wired to the configured inventory and model.
    pub fn advisor(&self) -> Result<LiveAdvisor> {
        let provider = self.provider()?;
        let source = self.source()?;
        Ok(Advisor::new(source, provider, self.config.selection))
    }
}
