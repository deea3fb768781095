use crate::{GenerationReport, SiteGenerator};
use anyhow::{Context, Result};
use blog_kit_core::SiteConfig;
use log::info;
use std::fs;

pub const MANIFEST_FILE: &str = "site.json";

/// Writes the config as `site.json` into `target-path` for a generator
/// that picks it up from disk.
#[derive(Debug, Default)]
pub struct ManifestGenerator;

impl SiteGenerator for ManifestGenerator {
    fn name(&self) -> &str {
        "manifest"
    }

    fn generate(&self, config: &SiteConfig) -> Result<GenerationReport> {
        let target = &config.target_path;
        fs::create_dir_all(target)
            .with_context(|| format!("Failed to create {}", target.display()))?;

        let json = config
            .to_json_string()
            .context("Failed to serialize site config")?;
        let path = target.join(MANIFEST_FILE);
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("wrote manifest {}", path.display());

        Ok(GenerationReport {
            generator: self.name().to_string(),
            target: target.clone(),
            written: vec![path],
        })
    }
}
