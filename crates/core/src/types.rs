use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete site configuration handed to the generator
///
/// Keys are kebab-case on the wire (`target-path`, `proj-name`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SiteConfig {
    /// Output directory for the generated site
    pub target_path: PathBuf,
    /// Source directory for static content
    pub static_path: PathBuf,
    pub logo_url: String,
    pub proj_name: String,
    /// Comment-system shortname
    pub disqus: String,
    pub proj_url: String,
    pub copy_years: String,
    pub additional_copyright: String,
    pub authors: Vec<String>,
    /// Navigation entries, rendered in declaration order
    pub header_menu: Vec<MenuItem>,
    pub static_pages: Vec<StaticPage>,
}

impl SiteConfig {
    /// Copy of this config with relative paths joined onto `base`.
    ///
    /// Absolute `target-path`/`static-path` values are kept as-is.
    pub fn resolve_paths(&self, base: &Path) -> SiteConfig {
        let resolve = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };

        SiteConfig {
            target_path: resolve(&self.target_path),
            static_path: resolve(&self.static_path),
            ..self.clone()
        }
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Header navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuItem {
    pub url: String,
    pub name: String,
    /// Icon identifier understood by the site theme (e.g. "github")
    pub icon: String,
}

/// Pre-authored content file rendered into the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StaticPage {
    /// Path relative to `static-path`
    pub filename: PathBuf,
    pub name: String,
    /// Per-page comment thread identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disqus_id: Option<String>,
}

impl StaticPage {
    /// Location of the source file under the given static directory
    pub fn page_path(&self, static_path: &Path) -> PathBuf {
        static_path.join(&self.filename)
    }
}
