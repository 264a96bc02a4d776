//! Note page writer.
//!
//! Notes render once, at their canonical route, with previous/next
//! navigation taken from the global reverse-chronological order.

use crate::config::BlogMetadata;
use crate::generator::{base_context, copy_page_attachments, page_url, write_page_file};
use crate::log;
use crate::page::{BlogPages, PageRecord};
use crate::pagination::{Neighbors, neighbors, sorted_notes};
use anyhow::Result;
use minijinja::context;

pub fn write_notes(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    log!("notes"; "building {} notes", pages.notes.len());

    let sorted = sorted_notes(&pages.notes);

    for (position, note) in sorted.iter().enumerate() {
        write_note(note, &neighbors(&sorted, position), metadata)?;
    }

    Ok(())
}

fn write_note(page: &PageRecord, nav: &Neighbors<'_>, metadata: &BlogMetadata) -> Result<()> {
    let url = &metadata.settings.url;
    let base = base_context(metadata, &page.title, &page.description, &page.rel_path, true);

    let rendered = metadata.templates.render(
        "note.html",
        context! {
            page => page,
            page_text => page.content,
            tags => metadata.tags,
            note_later_url => nav.later.map(|n| page_url(url, &n.rel_path)).unwrap_or_default(),
            note_later_title => nav.later.map(|n| n.title.clone()).unwrap_or_default(),
            note_earlier_url => nav.earlier.map(|n| page_url(url, &n.rel_path)).unwrap_or_default(),
            note_earlier_title => nav.earlier.map(|n| n.title.clone()).unwrap_or_default(),
            ..base
        },
    )?;

    let folder = write_page_file(&metadata.paths.output, &page.rel_path, &rendered)?;
    copy_page_attachments(page, &folder)
}
