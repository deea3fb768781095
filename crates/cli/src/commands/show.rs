use super::load_config;
use crate::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let site = load_config(config)?;
    let text = match format {
        OutputFormat::Toml => site.to_toml_string(),
        OutputFormat::Json => site.to_json_string(),
    }
    .context("Failed to serialize site config")?;
    println!("{}", text);
    Ok(())
}
