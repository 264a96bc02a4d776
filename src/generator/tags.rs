//! Tags index writer.
//!
//! Renders `notes/tags/index.html` with per-tag usage counters. Tags
//! nobody uses are filtered out here, at render time; the vocabulary
//! itself keeps them.

use crate::config::{BlogMetadata, count_usage};
use crate::log;
use crate::generator::{base_context, write_page_file};
use crate::page::BlogPages;
use anyhow::Result;
use minijinja::context;
use serde::Serialize;
use std::cmp::Reverse;

#[derive(Debug, Serialize)]
struct TagCounter {
    key: String,
    label: String,
    count: usize,
}

pub fn write_tags_page(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    log!("tags"; "building tags page");

    let counters = tag_counters(pages, metadata);
    let route = "notes/tags";
    let title = metadata.language_value("tags")?;
    let base = base_context(metadata, title, "", route, false);

    let rendered = metadata.templates.render(
        "tags.html",
        context! {
            tag_counters => counters,
            tags => metadata.tags,
            ..base
        },
    )?;

    write_page_file(&metadata.paths.output, route, &rendered)?;
    Ok(())
}

/// Used tags in descending count order; ties keep vocabulary order.
fn tag_counters(pages: &BlogPages, metadata: &BlogMetadata) -> Vec<TagCounter> {
    let counts = count_usage(pages.notes.iter().map(|note| note.tags.as_slice()));

    let mut counters: Vec<TagCounter> = metadata
        .tags
        .entries()
        .iter()
        .filter_map(|entry| {
            let count = counts.get(&entry.key).copied().unwrap_or(0);
            (count > 0).then(|| TagCounter {
                key: entry.key.clone(),
                label: entry.label.clone(),
                count,
            })
        })
        .collect();

    counters.sort_by_key(|counter| Reverse(counter.count));
    counters
}
