use crate::error::{Error, Result};
use crate::types::*;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    target_path: PathBuf,
    static_path: PathBuf,
    logo_url: String,
    proj_name: String,
    disqus: String,
    proj_url: String,
    copy_years: String,
    additional_copyright: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    header_menu: Vec<MenuItem>,
    #[serde(default)]
    static_pages: Vec<RawStaticPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawStaticPage {
    filename: String, // Convert to PathBuf
    name: String,
    disqus_id: Option<String>,
}

/// Parse site.toml from a file path
///
/// Paths inside the file are returned as written; see
/// [`load_site_toml`] for the variant that resolves them.
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml and resolve relative paths against its directory
pub fn load_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let path = path.as_ref();
    let config = parse_site_toml(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    debug!("resolving site paths against {}", base.display());
    Ok(config.resolve_paths(base))
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let static_pages: Result<Vec<StaticPage>> = raw
        .static_pages
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let filename = validate_path(&p.filename, &format!("static-pages[{}].filename", i))?;
            Ok(StaticPage {
                filename,
                name: p.name,
                disqus_id: p.disqus_id,
            })
        })
        .collect();
    let static_pages = static_pages?;

    debug!(
        "parsed site config '{}' ({} menu entries, {} static pages)",
        raw.proj_name,
        raw.header_menu.len(),
        static_pages.len()
    );

    Ok(SiteConfig {
        target_path: raw.target_path,
        static_path: raw.static_path,
        logo_url: raw.logo_url,
        proj_name: raw.proj_name,
        disqus: raw.disqus,
        proj_url: raw.proj_url,
        copy_years: raw.copy_years,
        additional_copyright: raw.additional_copyright,
        authors: raw.authors,
        header_menu: raw.header_menu,
        static_pages,
    })
}

/// Validate and convert a page filename to a relative PathBuf.
///
/// Rejects absolute paths, `..` components and blank strings so a
/// site.toml can only name files inside its static directory.
///
/// ```text
/// validate_path("about.md", "filename")          → Ok(PathBuf)
/// validate_path("posts/jwt.adoc", "filename")    → Ok(PathBuf)
/// validate_path("/etc/passwd", "filename")       → Err("Absolute paths not allowed...")
/// validate_path("../secret.md", "filename")      → Err("Parent directory references...")
/// ```
pub fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(Error::ConfigParse(format!(
            "Parent directory references (..) not allowed in '{}': '{}'",
            field_name, path_str
        )));
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}
