use super::load_config;
use anyhow::Result;
use blog_kit_validator::{ValidationReport, validate_site};
use std::path::Path;

pub fn run(config: Option<&Path>) -> Result<()> {
    let site = load_config(config)?;
    println!("Validating site: {}", site.proj_name);

    let report = validate_site(&site);
    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!("{} validation error(s)", report.errors.len());
    }
    println!("\n✓ Site configuration valid");
    Ok(())
}

pub fn print_report(report: &ValidationReport) {
    for line in &report.info {
        println!("  · {}", line);
    }
    for line in &report.warnings {
        eprintln!("  ⚠ {}", line);
    }
    for line in &report.errors {
        eprintln!("  ✗ {}", line);
    }
}
