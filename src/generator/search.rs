//! Search index writer.
//!
//! Emits `notes.json`, an array of `{html, text, tags}` objects in
//! reverse-chronological note order. `text` is a lowercased plain-text
//! projection of the HTML for client-side substring search.

use crate::config::BlogMetadata;
use crate::log;
use crate::page::{BlogPages, PageRecord};
use crate::pagination::sorted_notes;
use crate::utils::fs;
use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

#[derive(Debug, Serialize)]
struct SearchEntry<'a> {
    html: &'a str,
    text: String,
    tags: &'a [String],
}

pub fn write_search_index(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    log!("search"; "building the search index");

    let entries: Vec<SearchEntry<'_>> = sorted_notes(&pages.notes)
        .into_iter()
        .map(SearchEntry::from_note)
        .collect();

    let json = serde_json::to_string_pretty(&entries)?;
    fs::make_file(&metadata.paths.output.join("notes.json"), &json)
}

impl<'a> SearchEntry<'a> {
    fn from_note(note: &'a PageRecord) -> Self {
        Self {
            html: &note.content,
            text: plain_text(&note.content),
            tags: &note.tags,
        }
    }
}

/// Strip an HTML fragment down to searchable text: drop script/style
/// blocks and tags, decode the common entities, fold NBSP to a space,
/// collapse whitespace, lowercase.
fn plain_text(html: &str) -> String {
    static RE_EMBEDDED: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?is)<(script|style|noscript)\b.*?</(script|style|noscript)>").unwrap()
    });
    static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
    static RE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

    let text = RE_EMBEDDED.replace_all(html, " ");
    let text = RE_TAG.replace_all(&text, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    RE_SPACE.replace_all(&text, " ").trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tests::test_metadata;
    use crate::page::test_support::note;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_plain_text_strips_markup() {
        assert_eq!(plain_text("<p>Hello, <b>World</b>!</p>"), "hello, world!");
        assert_eq!(
            plain_text("<p>one</p>\n\n<p>two&nbsp;three</p>"),
            "one two three"
        );
        assert_eq!(
            plain_text("<script>var x = 1;</script><p>kept</p>"),
            "kept"
        );
        // embedded-block matching is case-insensitive
        assert_eq!(
            plain_text("<SCRIPT>var x = 1;</SCRIPT><STYLE>p {}</STYLE>ok"),
            "ok"
        );
        assert_eq!(plain_text("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(plain_text(""), "");
    }

    #[test]
    fn test_index_is_written_newest_first() {
        let dir = TempDir::new().unwrap();
        let metadata = test_metadata(dir.path(), None);
        std_fs::create_dir_all(&metadata.paths.output).unwrap();

        let pages = BlogPages {
            notes: vec![note("old", 1, &["life"]), note("new", 9, &["rust"])],
            ..BlogPages::default()
        };
        write_search_index(&pages, &metadata).unwrap();

        let json = std_fs::read_to_string(metadata.paths.output.join("notes.json")).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["html"], "<p>new</p>");
        assert_eq!(entries[0]["text"], "new");
        assert_eq!(entries[0]["tags"][0], "rust");
        assert_eq!(entries[1]["tags"][0], "life");
    }
}
