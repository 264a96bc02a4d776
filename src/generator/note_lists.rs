//! Note list writer.
//!
//! Emits the paginated note listings, unfiltered and once per vocabulary
//! tag:
//!
//! ```text
//! notes/index.html
//! notes/page-2/index.html
//! notes/tags/<tag>/index.html
//! notes/tags/<tag>/page-2/index.html
//! ```

use crate::config::BlogMetadata;
use crate::generator::{base_context, page_url, write_page_file};
use crate::log;
use crate::page::{BlogPages, NOTES_FOLDER_NAME};
use crate::pagination::{ListPage, notes_by_tag, paginate, sorted_notes};
use anyhow::Result;
use minijinja::context;

pub fn write_note_lists(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    log!("notes"; "building note lists");

    write_lists_for_tag(pages, None, metadata)?;

    for tag in metadata.tags.keys() {
        write_lists_for_tag(pages, Some(tag), metadata)?;
    }

    Ok(())
}

/// Route of a list page: `notes[/tags/<tag>][/page-N]`.
fn list_route(tag: Option<&str>, folder_name: Option<&str>) -> String {
    let mut parts = vec![NOTES_FOLDER_NAME];

    if let Some(tag) = tag {
        parts.push("tags");
        parts.push(tag);
    }
    if let Some(folder_name) = folder_name {
        parts.push(folder_name);
    }

    parts.join("/")
}

/// URL of the list page at `index` within a (possibly tag-filtered) listing.
fn list_page_url(metadata: &BlogMetadata, tag: Option<&str>, index: usize) -> String {
    let folder_name = (index >= 2).then(|| format!("page-{index}"));
    page_url(
        &metadata.settings.url,
        &list_route(tag, folder_name.as_deref()),
    )
}

fn write_lists_for_tag(
    pages: &BlogPages,
    tag: Option<&str>,
    metadata: &BlogMetadata,
) -> Result<()> {
    let sorted = sorted_notes(&pages.notes);
    let filtered = notes_by_tag(&sorted, tag);

    for list_page in paginate(&filtered) {
        write_list_page(&list_page, tag, metadata)?;
    }

    Ok(())
}

fn write_list_page(
    list_page: &ListPage<'_>,
    tag: Option<&str>,
    metadata: &BlogMetadata,
) -> Result<()> {
    let route = list_route(tag, list_page.folder_name().as_deref());
    let title = list_title(tag, metadata)?;
    let base = base_context(metadata, &title, "", &route, false);

    let rendered = metadata.templates.render(
        "notes_list.html",
        context! {
            notes => list_page.notes,
            tags => metadata.tags,
            selected_tag => tag,
            page_number => list_page.index,
            page_count => list_page.page_count,
            page_later_url => list_page
                .later_index()
                .map(|index| list_page_url(metadata, tag, index))
                .unwrap_or_default(),
            page_earlier_url => list_page
                .earlier_index()
                .map(|index| list_page_url(metadata, tag, index))
                .unwrap_or_default(),
            ..base
        },
    )?;

    write_page_file(&metadata.paths.output, &route, &rendered)?;
    Ok(())
}

/// Unfiltered lists use the localized "notes" string; tag lists use the
/// capitalized tag label.
fn list_title(tag: Option<&str>, metadata: &BlogMetadata) -> Result<String> {
    match tag {
        None => Ok(metadata.language_value("notes")?.to_owned()),
        Some(tag) => {
            let label = metadata.tags.label(tag).unwrap_or(tag);
            Ok(capitalize(label))
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
