use anyhow::{Context, Result};
use blog_kit_core::config::parse_site_toml_str;
use blog_kit_validator::scan_content_files;
use chrono::{Datelike, Local};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::fs;
use std::path::{Path, PathBuf};

const STATIC_DIR: &str = "pages";

/// Escape a string for safe inclusion in a TOML basic string.
///
/// The template carries comments, so it is assembled by hand rather than
/// serialized with the toml crate.
fn toml_escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Basic strings admit no other control characters
            c if c.is_ascii_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug)]
struct DetectedPage {
    /// Relative to the static directory
    filename: PathBuf,
    name: String,
}

/// Initialize a site directory.
///
/// Creates `pages/` if needed, picks up any content already in it, and
/// writes a `site.toml` listing those pages. Refuses to replace an
/// existing `site.toml` unless `force` is set.
pub fn run(
    path: PathBuf,
    name: Option<String>,
    url: Option<String>,
    author: Option<String>,
    force: bool,
) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let site_toml_path = path.join("site.toml");
    if site_toml_path.exists() && !force {
        anyhow::bail!(
            "site.toml already exists at {}\nHint: pass --force to overwrite it",
            site_toml_path.display()
        );
    }

    let static_dir = path.join(STATIC_DIR);
    fs::create_dir_all(&static_dir)
        .with_context(|| format!("Failed to create {}", static_dir.display()))?;

    let pages = detect_pages(&static_dir)?;
    if pages.is_empty() {
        println!("⚠ No content files found in {}/", STATIC_DIR);
    } else {
        println!("✓ Found {} page(s)", pages.len());
    }

    let toml = generate_site_toml(
        &pages,
        name.as_deref(),
        url.as_deref(),
        author.as_deref(),
        Local::now().year(),
    )?;
    fs::write(&site_toml_path, toml)
        .with_context(|| format!("Failed to write {}", site_toml_path.display()))?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml           ← Edit this to set name, menu, etc.");
    println!("  └── {}/", STATIC_DIR);
    for page in &pages {
        println!("      └── {}", page.filename.display());
    }

    println!("\nNext steps:");
    println!("  1. Edit site.toml (name, url, header menu)");
    println!("  2. Check it: blog-kit --config {} validate", site_toml_path.display());

    Ok(())
}

fn detect_pages(static_dir: &Path) -> Result<Vec<DetectedPage>> {
    scan_content_files(static_dir)
        .into_iter()
        .map(|filename| {
            let content = fs::read_to_string(static_dir.join(&filename))
                .with_context(|| format!("Failed to read {}", filename.display()))?;
            let name = extract_page_title(&filename, &content);
            Ok(DetectedPage { filename, name })
        })
        .collect()
}

/// Title for a content file: its first heading, else the humanized stem.
fn extract_page_title(filename: &Path, content: &str) -> String {
    let is_asciidoc = filename
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "adoc" | "asciidoc"))
        .unwrap_or(false);

    let heading = if is_asciidoc {
        asciidoc_title(content)
    } else {
        markdown_title(content)
    };

    heading.unwrap_or_else(|| title_from_stem(filename))
}

fn markdown_title(content: &str) -> Option<String> {
    let mut in_heading = false;
    let mut title = String::new();

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => {
                let trimmed = title.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                in_heading = false;
            }
            Event::Text(text) | Event::Code(text) if in_heading => title.push_str(&text),
            _ => {}
        }
    }
    None
}

/// AsciiDoc document title (`= Title`) or first section title
fn asciidoc_title(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim_end)
        .find_map(|line| {
            let rest = line.trim_start_matches('=');
            let level = line.len() - rest.len();
            let title = rest.trim();
            if (1..=6).contains(&level) && rest.starts_with(' ') && !title.is_empty() {
                Some(title.to_string())
            } else {
                None
            }
        })
}

/// `02_parsing-jwt.md` → "Parsing Jwt"
fn title_from_stem(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Page");

    let cleaned = stem
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '-' || c == '_' || c == '.')
        .trim();

    if cleaned.is_empty() {
        return "Untitled".to_string();
    }

    cleaned
        .replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_site_toml(
    pages: &[DetectedPage],
    name: Option<&str>,
    url: Option<&str>,
    author: Option<&str>,
    year: i32,
) -> Result<String> {
    let proj_name = toml_escape_string(name.unwrap_or("My Blog"));
    let proj_url = toml_escape_string(url.unwrap_or("https://blog.example.com"));
    let author_name = toml_escape_string(author.unwrap_or("Author Name"));

    let name_comment = if name.is_some() { "" } else { "  # TODO: Set site name" };
    let url_comment = if url.is_some() { "" } else { "  # TODO: Set site URL" };
    let author_comment = if author.is_some() { "" } else { "  # TODO: Set author" };

    let mut toml = format!(
        "# Generated by blog-kit init\n\
# Edit this file to customize your site\n\
\n\
target-path = \"public\"\n\
static-path = \"{STATIC_DIR}\"\n\
logo-url = \"img/logo.png\"\n\
proj-name = \"{proj_name}\"{name_comment}\n\
proj-url = \"{proj_url}\"{url_comment}\n\
disqus = \"\"  # Comment-system shortname, leave empty to disable\n\
copy-years = \"{year}\"\n\
additional-copyright = \"\"\n\
authors = [\"{author_name}\"]{author_comment}\n\
\n\
[[header-menu]]\n\
url = \"index.html\"\n\
name = \"Posts\"\n\
icon = \"list\"\n\
\n"
    );

    if pages.is_empty() {
        toml.push_str(
            r##"# Add pages here as you write them
# [[static-pages]]
# filename = "about.md"
# name = "About"
# disqus-id = "about"  # Optional
"##,
        );
    } else {
        toml.push_str("# Detected pages (edit names/add disqus-id as needed)\n");
        for page in pages {
            // TOML paths use forward slashes regardless of platform
            let filename = page.filename.to_string_lossy().replace('\\', "/");
            toml.push_str("[[static-pages]]\n");
            toml.push_str(&format!("filename = \"{}\"\n", toml_escape_string(&filename)));
            toml.push_str(&format!("name = \"{}\"\n", toml_escape_string(&page.name)));
            toml.push('\n');
        }
    }

    parse_site_toml_str(&toml)
        .context("Generated site.toml is invalid - this is a bug in the template generator")?;

    Ok(toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn detected(filename: &str, name: &str) -> DetectedPage {
        DetectedPage {
            filename: PathBuf::from(filename),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_markdown_title_first_heading() {
        let md = "Intro text\n\n## Generating *Text* with `Markov`\n\n# Later\n";
        assert_eq!(
            markdown_title(md).as_deref(),
            Some("Generating Text with Markov")
        );
    }

    #[test]
    fn test_markdown_title_setext_heading() {
        assert_eq!(markdown_title("Set Algebra\n===\n\nbody").as_deref(), Some("Set Algebra"));
    }

    #[test]
    fn test_markdown_title_none() {
        assert_eq!(markdown_title("just a paragraph"), None);
        assert_eq!(markdown_title(""), None);
    }

    #[test]
    fn test_asciidoc_title() {
        let adoc = ":toc:\n\n= Parsing JSON Web Tokens\nAuthor\n\n== Header\n";
        assert_eq!(asciidoc_title(adoc).as_deref(), Some("Parsing JSON Web Tokens"));
        assert_eq!(asciidoc_title("====\nblock delimiter\n===="), None);
        assert_eq!(asciidoc_title("no title here"), None);
    }

    #[test]
    fn test_asciidoc_title_skips_blank_headings() {
        let adoc = "= \t\n=\n\n= Set Algebra\n";
        assert_eq!(asciidoc_title(adoc).as_deref(), Some("Set Algebra"));
    }

    #[test]
    fn test_extract_page_title_dispatches_on_extension() {
        assert_eq!(
            extract_page_title(Path::new("jwt.adoc"), "= JWT\n"),
            "JWT"
        );
        // A markdown reader would not see "= JWT" as a heading
        assert_eq!(
            extract_page_title(Path::new("jwt.md"), "= JWT\n"),
            "Jwt"
        );
    }

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem(Path::new("02_parsing-jwt.md")), "Parsing Jwt");
        assert_eq!(title_from_stem(Path::new("factory-CONVENTION.md")), "Factory Convention");
        assert_eq!(title_from_stem(Path::new("2024.md")), "Untitled");
    }

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string("plain"), "plain");
        assert_eq!(toml_escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(toml_escape_string("C:\\blog"), "C:\\\\blog");
        assert_eq!(toml_escape_string("a\nb\tc"), "a\\nb\\tc");
        assert_eq!(toml_escape_string("bell\u{7}"), "bell\\u0007");
        assert_eq!(toml_escape_string("\u{0}del\u{7f}"), "\\u0000del\\u007F");
        assert_eq!(toml_escape_string("café"), "café");
    }

    #[test]
    fn test_run_with_control_characters_in_heading() {
        let dir = TempDir::new().unwrap();
        let pages = dir.path().join(STATIC_DIR);
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("post.md"), "# Bell\u{7} Title\n").unwrap();

        run(dir.path().to_path_buf(), None, None, None, false).unwrap();

        let config = blog_kit_core::parse_site_toml(dir.path().join("site.toml")).unwrap();
        assert_eq!(config.static_pages[0].name, "Bell\u{7} Title");
    }

    #[test]
    fn test_generate_site_toml_empty_pages() {
        let toml = generate_site_toml(&[], None, None, None, 2024).unwrap();
        let config = parse_site_toml_str(&toml).unwrap();
        assert_eq!(config.proj_name, "My Blog");
        assert_eq!(config.copy_years, "2024");
        assert!(config.static_pages.is_empty());
        assert!(toml.contains("# [[static-pages]]"));
    }

    #[test]
    fn test_generate_site_toml_with_pages_and_special_chars() {
        let pages = vec![
            detected("about.md", "About \"Me\""),
            detected("posts/markov.adoc", "Markov\\Chains"),
        ];
        let toml = generate_site_toml(
            &pages,
            Some("Notes \"on\" Code"),
            Some("https://notes.example.org"),
            Some("A. Writer"),
            2025,
        )
        .unwrap();

        let config = parse_site_toml_str(&toml).unwrap();
        assert_eq!(config.proj_name, "Notes \"on\" Code");
        assert_eq!(config.authors, vec!["A. Writer"]);
        assert_eq!(config.static_pages.len(), 2);
        assert_eq!(config.static_pages[0].name, "About \"Me\"");
        assert_eq!(config.static_pages[1].filename, PathBuf::from("posts/markov.adoc"));
        assert_eq!(config.static_pages[1].name, "Markov\\Chains");
        assert!(!toml.contains("TODO"));
    }

    #[test]
    fn test_run_creates_structure_and_lists_pages() {
        let dir = TempDir::new().unwrap();
        let pages = dir.path().join(STATIC_DIR);
        fs::create_dir_all(pages.join("posts")).unwrap();
        fs::write(pages.join("about.md"), "# About This Blog\n").unwrap();
        fs::write(pages.join("posts/jwt.adoc"), "= Parsing JWT\n").unwrap();
        fs::write(pages.join("logo.png"), b"png").unwrap();

        run(dir.path().to_path_buf(), None, None, None, false).unwrap();

        let config =
            blog_kit_core::parse_site_toml(dir.path().join("site.toml")).unwrap();
        let listed: Vec<_> = config
            .static_pages
            .iter()
            .map(|p| (p.filename.clone(), p.name.clone()))
            .collect();
        assert_eq!(
            listed,
            vec![
                (PathBuf::from("about.md"), "About This Blog".to_string()),
                (PathBuf::from("posts/jwt.adoc"), "Parsing JWT".to_string()),
            ]
        );
    }

    #[test]
    fn test_run_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("new-site");
        run(target.clone(), Some("New".to_string()), None, None, false).unwrap();
        assert!(target.join(STATIC_DIR).is_dir());
        assert!(target.join("site.toml").is_file());
    }

    #[test]
    fn test_run_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site.toml"), "keep me").unwrap();

        let err = run(dir.path().to_path_buf(), None, None, None, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(dir.path().join("site.toml")).unwrap(), "keep me");

        run(dir.path().to_path_buf(), None, None, None, true).unwrap();
        assert_ne!(fs::read_to_string(dir.path().join("site.toml")).unwrap(), "keep me");
    }
}
