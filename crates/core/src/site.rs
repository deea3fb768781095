//! The blog's own configuration, compiled in.

use crate::types::{MenuItem, SiteConfig, StaticPage};
use std::path::PathBuf;
use std::sync::LazyLock;

static SITE: LazyLock<SiteConfig> = LazyLock::new(build_site);

/// The built-in site configuration.
///
/// Constructed on first access; every call returns the same value.
pub fn site() -> &'static SiteConfig {
    &SITE
}

fn menu(url: &str, name: &str, icon: &str) -> MenuItem {
    MenuItem {
        url: url.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn page(filename: &str, name: &str, disqus_id: Option<&str>) -> StaticPage {
    StaticPage {
        filename: PathBuf::from(filename),
        name: name.to_string(),
        disqus_id: disqus_id.map(str::to_string),
    }
}

fn build_site() -> SiteConfig {
    SiteConfig {
        target_path: PathBuf::from("docs"),
        static_path: PathBuf::from("pages"),
        logo_url: "img/logo.png".to_string(),
        proj_name: "Notes on Code".to_string(),
        disqus: "notes-on-code".to_string(),
        proj_url: "https://notes-on-code.example.org".to_string(),
        copy_years: "2016-2024".to_string(),
        additional_copyright: "Essays licensed under CC BY-SA 4.0".to_string(),
        authors: vec!["The Author".to_string()],
        header_menu: vec![
            menu("index.html", "Posts", "list"),
            menu("about.html", "About", "user"),
            menu("https://github.com/notes-on-code", "Code", "github"),
        ],
        static_pages: vec![
            page("about.md", "About", None),
            page("markov-chain-text.adoc", "Generating Text with Markov Chains", Some("markov-chains")),
            page("parsing-jwt.adoc", "Parsing JSON Web Tokens by Hand", Some("parsing-jwt")),
            page("factory-convention.md", "A Convention for Factories", Some("factory-convention")),
            page("set-algebra.md", "Set Algebra as a Library", Some("set-algebra")),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_site_is_stable_across_calls() {
        let a = site();
        let b = site();
        assert_eq!(a, b);
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_site_is_fully_populated() {
        let s = site();
        assert!(!s.proj_name.is_empty());
        assert!(!s.proj_url.is_empty());
        assert!(!s.disqus.is_empty());
        assert!(!s.authors.is_empty());
        assert!(!s.header_menu.is_empty());
        assert!(!s.static_pages.is_empty());
    }

    #[test]
    fn test_static_page_filenames_unique_and_non_empty() {
        let mut seen = HashSet::new();
        for p in &site().static_pages {
            assert!(!p.filename.as_os_str().is_empty());
            assert!(seen.insert(p.filename.clone()), "duplicate {:?}", p.filename);
        }
    }

    #[test]
    fn test_site_round_trips_through_toml() {
        let text = site().to_toml_string().unwrap();
        let back = crate::config::parse_site_toml_str(&text).unwrap();
        assert_eq!(&back, site());
    }

    #[test]
    fn test_menu_order_is_declaration_order() {
        let names: Vec<_> = site().header_menu.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Posts", "About", "Code"]);
    }
}
