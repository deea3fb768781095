use super::load_config;
use super::validate::print_report;
use anyhow::{Context, Result};
use blog_kit_generator::{CommandGenerator, ManifestGenerator, SiteGenerator};
use blog_kit_validator::validate_site;
use log::warn;
use std::path::Path;

/// Validate the config, then hand it to the generator exactly once
pub fn run(
    config: Option<&Path>,
    exec: Option<String>,
    args: Vec<String>,
    skip_validation: bool,
) -> Result<()> {
    let site = load_config(config)?;

    println!("🔨 Building site: {}", site.proj_name);
    println!("   Source: {}", site.static_path.display());
    println!("   Output: {}", site.target_path.display());
    println!();

    if skip_validation {
        warn!("validation skipped");
    } else {
        let report = validate_site(&site);
        print_report(&report);
        if !report.is_ok() {
            anyhow::bail!(
                "{} validation error(s); fix them or pass --skip-validation",
                report.errors.len()
            );
        }
        println!("✓ Validation passed");
    }

    let generator: Box<dyn SiteGenerator> = match exec {
        Some(program) => Box::new(CommandGenerator::new(program, args)),
        None => Box::new(ManifestGenerator),
    };

    println!("📄 Running generator: {}", generator.name());
    let report = generator
        .generate(&site)
        .with_context(|| format!("Generator '{}' did not complete", generator.name()))?;

    for path in &report.written {
        println!("   ✓ Wrote {}", path.display());
    }
    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", report.target.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SITE: &str = r##"
target-path = "public"
static-path = "pages"
logo-url = ""
proj-name = "Build Test"
disqus = ""
proj-url = "https://build.example.com"
copy-years = "2024"
additional-copyright = ""
authors = ["Tester"]

[[static-pages]]
filename = "about.md"
name = "About"
"##;

    fn site_dir(with_page: bool) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        if with_page {
            fs::write(dir.path().join("pages/about.md"), "# About\n").unwrap();
        }
        fs::write(dir.path().join("site.toml"), SITE).unwrap();
        dir
    }

    #[test]
    fn test_build_writes_manifest() {
        let dir = site_dir(true);
        run(Some(dir.path().join("site.toml").as_path()), None, vec![], false).unwrap();
        assert!(dir.path().join("public/site.json").is_file());
    }

    #[test]
    fn test_build_aborts_on_validation_errors() {
        let dir = site_dir(false);
        let err = run(Some(dir.path().join("site.toml").as_path()), None, vec![], false).unwrap_err();
        assert!(err.to_string().contains("validation error"));
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn test_build_skip_validation() {
        let dir = site_dir(false);
        run(Some(dir.path().join("site.toml").as_path()), None, vec![], true).unwrap();
        assert!(dir.path().join("public/site.json").is_file());
    }
}
