// Pre-flight checks run before handing a site config to the generator

use blog_kit_core::config::validate_path;
use blog_kit_core::SiteConfig;
use chrono::Datelike;
use log::debug;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// File extensions treated as page content when scanning `static-path`
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "adoc", "asciidoc"];

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn note(&mut self, msg: impl Into<String>) {
        self.info.push(msg.into());
    }
}

/// Validate a site config against itself and the filesystem.
///
/// Never mutates the config. Paths are checked as given, so callers
/// loading from a file should resolve them first.
pub fn validate_site(config: &SiteConfig) -> ValidationReport {
    validate_site_at(config, chrono::Local::now().year())
}

fn validate_site_at(config: &SiteConfig, current_year: i32) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_metadata(config, current_year, &mut report);
    check_header_menu(config, &mut report);
    let static_dir_ok = check_static_dir(&config.static_path, &mut report);
    check_static_pages(config, static_dir_ok, &mut report);
    if static_dir_ok {
        check_unlisted_content(config, &mut report);
    }

    report.note(format!(
        "{} menu entries, {} static pages",
        config.header_menu.len(),
        config.static_pages.len()
    ));
    debug!(
        "validation finished: {} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );

    report
}

fn check_metadata(config: &SiteConfig, current_year: i32, report: &mut ValidationReport) {
    if config.proj_name.trim().is_empty() {
        report.error("proj-name is empty");
    }

    if !(config.proj_url.starts_with("https://") || config.proj_url.starts_with("http://")) {
        report.warn(format!(
            "proj-url '{}' is not an http(s) URL",
            config.proj_url
        ));
    }

    if config.authors.iter().all(|a| a.trim().is_empty()) {
        report.warn("no authors listed");
    }

    match parse_copy_years(&config.copy_years) {
        Ok((_, end)) if end > current_year => report.warn(format!(
            "copy-years '{}' ends after the current year ({})",
            config.copy_years, current_year
        )),
        Ok(_) => {}
        Err(msg) => report.error(msg),
    }
}

/// Parse `YYYY` or `YYYY-YYYY` into an inclusive (start, end) pair
pub fn parse_copy_years(s: &str) -> Result<(i32, i32), String> {
    let parse_year = |part: &str| -> Result<i32, String> {
        let part = part.trim();
        if part.len() != 4 || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!(
                "copy-years '{}' must be YYYY or YYYY-YYYY",
                s
            ));
        }
        part.parse::<i32>()
            .map_err(|_| format!("copy-years '{}' must be YYYY or YYYY-YYYY", s))
    };

    match s.split_once('-') {
        None => {
            let year = parse_year(s)?;
            Ok((year, year))
        }
        Some((start, end)) => {
            let start = parse_year(start)?;
            let end = parse_year(end)?;
            if start > end {
                return Err(format!(
                    "copy-years '{}' starts after it ends",
                    s
                ));
            }
            Ok((start, end))
        }
    }
}

fn check_header_menu(config: &SiteConfig, report: &mut ValidationReport) {
    let mut seen_urls = HashSet::new();
    for (i, item) in config.header_menu.iter().enumerate() {
        if item.url.trim().is_empty() {
            report.error(format!("header-menu[{}] has an empty url", i));
        } else if !seen_urls.insert(item.url.as_str()) {
            report.warn(format!(
                "header-menu[{}] repeats url '{}'",
                i, item.url
            ));
        }
        if item.name.trim().is_empty() {
            report.error(format!("header-menu[{}] has an empty name", i));
        }
    }
}

fn check_static_dir(static_path: &Path, report: &mut ValidationReport) -> bool {
    if !static_path.exists() {
        report.error(format!(
            "static-path does not exist: {}",
            static_path.display()
        ));
        return false;
    }
    if !static_path.is_dir() {
        report.error(format!(
            "static-path is not a directory: {}",
            static_path.display()
        ));
        return false;
    }
    true
}

fn check_static_pages(config: &SiteConfig, static_dir_ok: bool, report: &mut ValidationReport) {
    let mut seen = HashSet::new();

    for (i, page) in config.static_pages.iter().enumerate() {
        let field = format!("static-pages[{}].filename", i);
        let raw = page.filename.to_string_lossy();

        if let Err(e) = validate_path(&raw, &field) {
            report.error(e.to_string());
            continue;
        }

        if !seen.insert(normalized(&page.filename)) {
            report.error(format!("{} duplicates '{}'", field, raw));
            continue;
        }

        if page.name.trim().is_empty() {
            report.warn(format!("static-pages[{}] '{}' has an empty name", i, raw));
        }

        if page.disqus_id.is_some() && config.disqus.trim().is_empty() {
            report.warn(format!(
                "static-pages[{}] '{}' sets disqus-id but disqus is empty",
                i, raw
            ));
        }

        if static_dir_ok {
            let path = page.page_path(&config.static_path);
            if !path.is_file() {
                report.error(format!(
                    "static page '{}' not found at {}",
                    raw,
                    path.display()
                ));
            }
        }
    }
}

/// `./about.md` and `about.md` name the same page
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| *c != Component::CurDir)
        .collect()
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CONTENT_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Content files under `dir`, relative to it, sorted
pub fn scan_content_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_content_file(e.path()))
        .filter_map(|e| e.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}

fn check_unlisted_content(config: &SiteConfig, report: &mut ValidationReport) {
    let listed: HashSet<PathBuf> = config
        .static_pages
        .iter()
        .map(|p| normalized(&p.filename))
        .collect();

    for file in scan_content_files(&config.static_path) {
        if !listed.contains(file.as_path()) {
            report.note(format!(
                "{} is not listed in static-pages",
                file.display()
            ));
        }
    }
}
