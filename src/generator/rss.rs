//! RSS feed writer.
//!
//! Emits `rss.xml` with the ten most recent notes. Notes carrying the
//! `no-rss` option stay out of the feed.

use crate::config::BlogMetadata;
use crate::generator::page_url;
use crate::log;
use crate::page::{BlogPages, PageRecord};
use crate::pagination::sorted_notes;
use crate::utils::fs;
use anyhow::{Result, anyhow};
use rss::{Channel, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

/// Feed length cap.
const RSS_ITEM_COUNT: usize = 10;

pub fn write_rss(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    log!("rss"; "building the feed");

    let channel = build_channel(pages, metadata);
    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;

    fs::make_file(&metadata.paths.output.join("rss.xml"), &channel.to_string())
}

fn build_channel(pages: &BlogPages, metadata: &BlogMetadata) -> Channel {
    let items: Vec<rss::Item> = sorted_notes(&pages.notes)
        .into_iter()
        .filter(|note| !note.has_option("no-rss"))
        .take(RSS_ITEM_COUNT)
        .map(|note| note_to_item(note, metadata))
        .collect();

    ChannelBuilder::default()
        .title(&metadata.settings.title)
        .link(&metadata.settings.url)
        .description(&metadata.settings.description)
        .generator("blogen".to_string())
        .items(items)
        .build()
}

fn note_to_item(note: &PageRecord, metadata: &BlogMetadata) -> rss::Item {
    ItemBuilder::default()
        .title(note.title.clone())
        .link(page_url(&metadata.settings.url, &note.rel_path))
        .guid(
            GuidBuilder::default()
                .permalink(false)
                .value(format!("note-{}", note.folder_name))
                .build(),
        )
        .description(note.content.clone())
        .pub_date(note.created.and_utc().to_rfc2822())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tests::test_metadata;
    use crate::page::test_support::note;
    use tempfile::TempDir;

    fn channel_for(notes: Vec<PageRecord>) -> Channel {
        let dir = TempDir::new().unwrap();
        let metadata = test_metadata(dir.path(), None);
        let pages = BlogPages {
            notes,
            ..BlogPages::default()
        };
        build_channel(&pages, &metadata)
    }

    #[test]
    fn test_items_are_newest_first_and_capped() {
        let notes: Vec<_> = (1..=12).map(|day| note(&format!("n{day:02}"), day, &[])).collect();
        let channel = channel_for(notes);

        assert_eq!(channel.items().len(), RSS_ITEM_COUNT);
        assert_eq!(channel.items()[0].title(), Some("N12"));
        assert_eq!(channel.items()[9].title(), Some("N03"));
    }

    #[test]
    fn test_no_rss_notes_are_excluded() {
        let mut hidden = note("hidden", 9, &[]);
        hidden.options = vec!["no-rss".to_owned()];
        let channel = channel_for(vec![note("shown", 1, &[]), hidden]);

        assert_eq!(channel.items().len(), 1);
        assert_eq!(channel.items()[0].title(), Some("SHOWN"));
    }

    #[test]
    fn test_item_fields() {
        let channel = channel_for(vec![note("hello", 2, &[])]);
        let item = &channel.items()[0];

        assert_eq!(item.link(), Some("https://example.com/notes/hello/"));
        assert_eq!(item.description(), Some("<p>hello</p>"));

        let guid = item.guid().unwrap();
        assert_eq!(guid.value(), "note-hello");
        assert!(!guid.is_permalink());

        assert!(item.pub_date().unwrap().contains("Jan 2024"));
    }

    #[test]
    fn test_channel_validates() {
        let channel = channel_for(vec![note("a", 1, &[])]);
        assert!(channel.validate().is_ok());
    }
}
