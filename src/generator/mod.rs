//! Output writers.
//!
//! Each sub-module owns exactly one artifact family and consumes the
//! fully loaded [`BlogMetadata`] + [`BlogPages`] without mutating them.
//! Shared URL conventions and template context plumbing live here so all
//! writers agree on where a page lives.

pub mod note_lists;
pub mod notes;
pub mod projects;
pub mod projects_list;
pub mod rss;
pub mod search;
pub mod service;
pub mod sitemap;
pub mod tags;
pub mod texts;

use crate::config::BlogMetadata;
use crate::page::PageRecord;
use crate::utils::fs;
use anyhow::Result;
use minijinja::context;
use std::path::{Path, PathBuf};

/// Canonical URL of a page route: `<url>/<route>/`, `<url>/` for the root.
pub fn page_url(site_url: &str, rel_path: &str) -> String {
    if rel_path.is_empty() {
        format!("{site_url}/")
    } else {
        format!("{site_url}/{rel_path}/")
    }
}

/// Template context keys shared by every HTML page.
pub fn base_context(
    metadata: &BlogMetadata,
    page_title: &str,
    page_description: &str,
    page_path: &str,
    page_is_editable: bool,
) -> minijinja::Value {
    context! {
        language => metadata.language,
        settings => metadata.settings,
        page_title => page_title,
        page_description => page_description,
        page_path => page_path,
        page_edit_url => edit_url(metadata, page_path, page_is_editable),
    }
}

/// GitHub "edit this page" link, empty when not applicable.
fn edit_url(metadata: &BlogMetadata, page_path: &str, page_is_editable: bool) -> String {
    if !page_is_editable {
        return String::new();
    }
    let Some(repository) = &metadata.settings.github_repository else {
        return String::new();
    };

    let mut parts = vec![format!("https://github.com/{repository}/edit/main")];
    if !page_path.is_empty() {
        parts.push(page_path.to_owned());
    }
    parts.push("index.md".to_owned());

    parts.join("/")
}

/// Write rendered HTML as `<output>/<route>/index.html`.
///
/// Returns the page's output folder so callers can drop attachments next
/// to it.
pub fn write_page_file(output_root: &Path, rel_path: &str, rendered: &str) -> Result<PathBuf> {
    let folder = if rel_path.is_empty() {
        output_root.to_path_buf()
    } else {
        output_root.join(rel_path)
    };

    fs::make_folder(&folder)?;
    fs::make_file(&folder.join("index.html"), rendered)?;

    Ok(folder)
}

/// Copy a page's attachments next to its `index.html`.
pub fn copy_page_attachments(page: &PageRecord, output_folder: &Path) -> Result<()> {
    for attachment in &page.attachments {
        fs::copy_file(
            &page.folder_path.join(attachment),
            &output_folder.join(attachment),
        )?;
    }
    Ok(())
}
