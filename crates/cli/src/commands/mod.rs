pub mod build;
pub mod init;
pub mod show;
pub mod validate;

use anyhow::{Context, Result};
use blog_kit_core::{SiteConfig, load_site_toml, site};
use log::debug;
use std::path::Path;

/// Load the site config from `--config`, or fall back to the built-in one
pub fn load_config(config: Option<&Path>) -> Result<SiteConfig> {
    match config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!(
                    "{} not found\nRun 'blog-kit init <dir>' to create one",
                    path.display()
                );
            }
            debug!("loading site config from {}", path.display());
            load_site_toml(path).with_context(|| format!("Failed to parse {}", path.display()))
        }
        None => {
            debug!("using built-in site config");
            Ok(site().clone())
        }
    }
}
