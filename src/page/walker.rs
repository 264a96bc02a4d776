//! Pages-root tree walk and page classification.
//!
//! A directory is a page iff it directly contains `index.yaml`. Each page
//! is classified exactly once by path-prefix containment, with precedence
//! note → project → text; the notes and projects areas are expected never
//! to overlap, but the precedence keeps classification deterministic if
//! they somehow do.

use crate::config::BlogMetadata;
use crate::page::{
    BlogPages, INFO_FILE_NAME, NOTES_FOLDER_NAME, PROJECTS_FOLDER_NAME, load_page,
};
use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// A directory is a page iff the metadata file sits directly inside it.
pub fn is_page_folder(dir: &Path) -> bool {
    dir.join(INFO_FILE_NAME).is_file()
}

/// Walk the pages root and load every page folder into its bucket.
pub fn walk_pages(metadata: &BlogMetadata) -> Result<BlogPages> {
    let pages_root = &metadata.paths.pages;
    let notes_root = pages_root.join(NOTES_FOLDER_NAME);
    let projects_root = pages_root.join(PROJECTS_FOLDER_NAME);

    let mut pages = BlogPages::default();

    // sorted walk keeps bucket order stable across runs
    for entry in WalkDir::new(pages_root).sort_by_file_name() {
        let entry = entry.with_context(|| {
            format!("Unable to walk the pages root: {}", pages_root.display())
        })?;

        if !entry.file_type().is_dir() || !is_page_folder(entry.path()) {
            continue;
        }

        let page = load_page(entry.path(), metadata)?;

        if entry.path().starts_with(&notes_root) {
            pages.notes.push(page);
        } else if entry.path().starts_with(&projects_root) {
            pages.projects.push(page);
        } else {
            pages.texts.push(page);
        }
    }

    Ok(pages)
}
