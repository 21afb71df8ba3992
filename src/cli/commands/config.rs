//! Config Command
//!
//! Manage Control Tower configuration.
//!
//! Usage:
//!   controltower config show [-g] [-f json]
//!   controltower config path
//!   controltower config init [-g] [--force]

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged configuration, or the raw global file with `global`
pub fn show(global: bool, format: &str) -> Result<()> {
    if global {
        match ConfigLoader::global_config_path() {
            Some(path) if path.exists() => {
                println!("# Global Config: {}\n", path.display());
                println!("{}", std::fs::read_to_string(&path)?);
            }
            Some(_) => {
                println!("No global config found.");
                println!("Run 'controltower config init --global' to create one.");
            }
            None => println!("Cannot determine global config directory."),
        }
        return Ok(());
    }

    let config = ConfigLoader::load()?;
    println!("{}", ConfigLoader::render(&config, format == "json")?);
    Ok(())
}

/// Show configuration file locations and whether they exist
pub fn path() -> Result<()> {
    let out = Output::new();
    out.header("Configuration Files");

    match ConfigLoader::global_config_path() {
        Some(path) => out.field("Global", describe(&path)),
        None => out.field("Global", "(unavailable)"),
    }
    out.field("Project", describe(&ConfigLoader::project_config_path()));
    out.field("Env", "CONTROLTOWER_<SECTION>__<KEY>");
    Ok(())
}

pub fn init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };

    let scope = if global { "global" } else { "project" };
    Output::new().success(&format!("Initialized {} configuration", scope));
    println!("  Config: {}", path.display());
    Ok(())
}

fn describe(path: &std::path::Path) -> String {
    let state = if path.exists() { "exists" } else { "not found" };
    format!("{} ({})", path.display(), state)
}
