// Hand-off to the external static site generator
//
// Rendering lives outside this workspace. A `SiteGenerator` receives the
// whole config exactly once and reports what it wrote.

pub mod command;
pub mod manifest;

pub use command::CommandGenerator;
pub use manifest::ManifestGenerator;

use blog_kit_core::SiteConfig;
use std::path::PathBuf;

#[derive(Debug)]
pub struct GenerationReport {
    /// Name of the generator that ran
    pub generator: String,
    pub target: PathBuf,
    /// Files this process wrote itself (external tools report their own)
    pub written: Vec<PathBuf>,
}

pub trait SiteGenerator {
    fn name(&self) -> &str;

    fn generate(&self, config: &SiteConfig) -> anyhow::Result<GenerationReport>;
}
