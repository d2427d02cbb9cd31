//! Config command implementation.

use std::path::Path;

use anyhow::{Result, bail};

use crate::cli::ConfigAction;
use crate::config::Config;

pub fn cmd_config(action: ConfigAction, path: &Path, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save_to(path)?;
            eprintln!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        cmd_config(ConfigAction::Init { force: false }, &path, &Config::default()).unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "no_color = true\n").unwrap();

        let err = cmd_config(ConfigAction::Init { force: false }, &path, &Config::default());
        assert!(err.is_err());
        assert!(Config::load_from(&path).no_color);

        cmd_config(ConfigAction::Init { force: true }, &path, &Config::default()).unwrap();
        assert!(!Config::load_from(&path).no_color);
    }
}
