//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;

/// Execute the config command.
///
/// Changes are applied to the file on disk, not to flag overrides of this run.
pub fn execute_config(args: ConfigArgs, session: &Session) -> Result<()> {
    let formatter = &session.formatter;
    let path = &session.config_path;

    match args.action {
        ConfigAction::Show => {
            println!("{}", formatter.info(&format!("Config file: {}", path.display())));
            match session.config.catalog_source() {
                Ok(source) => println!("Inventory: {}", source.location()),
                Err(_) => println!("{}", formatter.warning("Inventory: not configured")),
            }
            println!();
            print!("{}", session.config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::SetSheet { id } => {
            let mut config = Config::load_from(path)?;
            config.use_sheet(id.trim());
            // Reject ids that cannot form an export URL before saving
            let source = config.catalog_source()?;
            config.save_to(path)?;
            println!("{}", formatter.success(&format!("Inventory sheet set: {}", source.location())));
        }
        ConfigAction::SetFile { path: file } => {
            let mut config = Config::load_from(path)?;
            if !file.exists() {
                println!("{}", formatter.warning(&format!("{} does not exist yet", file.display())));
            }
            config.use_file(file.clone());
            config.save_to(path)?;
            println!("{}", formatter.success(&format!("Inventory file set: {}", file.display())));
        }
        ConfigAction::SetModel { name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(crate::error::CliError::InvalidInput(
                    "Model name cannot be empty".to_string(),
                ));
            }
            let mut config = Config::load_from(path)?;
            config.model.name = name.clone();
            config.save_to(path)?;
            println!("{}", formatter.success(&format!("Model set: {}", name)));
        }
    }

    Ok(())
}
