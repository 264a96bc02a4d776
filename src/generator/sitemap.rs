//! Sitemap writer.
//!
//! Emits `sitemap.xml` listing texts and notes:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/notes/hello/</loc>
//!     <lastmod>2024-01-02</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! Pages carrying the `no-sitemap` option are skipped; undated pages get
//! no `<lastmod>`.

use crate::config::BlogMetadata;
use crate::generator::page_url;
use crate::log;
use crate::page::{BlogPages, PageRecord};
use crate::utils::fs;
use anyhow::Result;
use chrono::NaiveDateTime;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub fn write_sitemap(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    log!("sitemap"; "building the sitemap");

    let sitemap = Sitemap::from_pages(pages, metadata);
    fs::make_file(&metadata.paths.output.join("sitemap.xml"), &sitemap.into_xml())
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    /// `YYYY-MM-DD`, absent for undated pages
    lastmod: Option<String>,
}

impl Sitemap {
    fn from_pages(pages: &BlogPages, metadata: &BlogMetadata) -> Self {
        let urls = pages
            .texts
            .iter()
            .chain(&pages.notes)
            .filter(|page| !page.has_option("no-sitemap"))
            .map(|page| UrlEntry::from_page(page, metadata))
            .collect();

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

impl UrlEntry {
    fn from_page(page: &PageRecord, metadata: &BlogMetadata) -> Self {
        let lastmod =
            (page.created != NaiveDateTime::MIN).then(|| page.created.format("%Y-%m-%d").to_string());

        Self {
            loc: page_url(&metadata.settings.url, &page.rel_path),
            lastmod,
        }
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
