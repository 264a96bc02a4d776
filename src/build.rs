//! Build orchestration.
//!
//! One build is a single-threaded batch:
//!
//! ```text
//! load metadata → walk pages → re-sort vocabularies by usage
//!     → clear output → run every writer → copy skin assets
//! ```
//!
//! Writers only read the loaded state, so re-running on unchanged input
//! produces byte-identical output.

use crate::cli::InputArgs;
use crate::config::BlogMetadata;
use crate::generator;
use crate::log;
use crate::page::{BlogPages, INFO_FILE_NAME, NOTES_FOLDER_NAME, walk_pages};
use crate::utils::fs;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs as std_fs;
use std::path::Path;
use walkdir::WalkDir;

/// Output entries that survive the pre-build clear.
const OUTPUT_KEEP_NAMES: [&str; 2] = [".git", "CNAME"];

/// Run a full build and return the loaded metadata for the caller
/// (the preview server reuses it).
pub fn build_blog(
    input: &InputArgs,
    output: &Path,
    url_override: Option<&str>,
) -> Result<BlogMetadata> {
    let mut metadata = BlogMetadata::load(input, output, url_override)?;

    log!("build"; "reading pages from {}", metadata.paths.pages.display());
    let pages = walk_pages(&metadata)?;
    log!(
        "build"; "found {} texts, {} notes, {} projects",
        pages.texts.len(),
        pages.notes.len(),
        pages.projects.len()
    );

    metadata
        .tags
        .sort_by_usage(pages.notes.iter().map(|note| note.tags.as_slice()));
    metadata
        .stacks
        .sort_by_usage(pages.projects.iter().map(|project| project.stacks.as_slice()));

    clear_output(&metadata.paths.output)?;
    write_site(&pages, &metadata)?;
    copy_assets(&metadata)?;

    log!("build"; "done");
    Ok(metadata)
}

fn write_site(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    generator::texts::write_texts(pages, metadata)?;
    generator::notes::write_notes(pages, metadata)?;
    generator::note_lists::write_note_lists(pages, metadata)?;
    generator::tags::write_tags_page(pages, metadata)?;
    generator::projects::write_projects(pages, metadata)?;
    generator::projects_list::write_projects_list(pages, metadata)?;
    generator::rss::write_rss(pages, metadata)?;
    generator::sitemap::write_sitemap(pages, metadata)?;
    generator::search::write_search_index(pages, metadata)?;
    generator::service::write_service_files(metadata)
}

/// Empty the output directory, keeping the deploy-related allow-list.
fn clear_output(output: &Path) -> Result<()> {
    fs::make_folder(output)?;
    log!("build"; "clearing {}", output.display());

    for entry in fs::list_dir(output)? {
        let name = entry.file_name().unwrap_or_default().to_string_lossy();
        if OUTPUT_KEEP_NAMES.contains(&name.as_ref()) {
            continue;
        }

        if entry.is_dir() {
            std_fs::remove_dir_all(&entry)
        } else {
            std_fs::remove_file(&entry)
        }
        .with_context(|| format!("Unable to remove: {}", entry.display()))?;
    }

    Ok(())
}

/// Copy the skin's static assets into the output root, tree-preserving.
fn copy_assets(metadata: &BlogMetadata) -> Result<()> {
    let assets = &metadata.paths.assets;
    log!("build"; "copying assets from {}", assets.display());

    fs::copy_tree(assets, &metadata.paths.output)
}

// ============================================================================
// Tag listing (the `tags` subcommand)
// ============================================================================

/// Print every tag used by at least one note, one per line, sorted.
///
/// A light scan: only the notes' `index.yaml` files are parsed, nothing
/// is rendered.
pub fn print_used_tags(input: &InputArgs) -> Result<()> {
    for tag in collect_used_tags(&input.pages.join(NOTES_FOLDER_NAME))? {
        println!("{tag}");
    }
    Ok(())
}

fn collect_used_tags(notes_root: &Path) -> Result<BTreeSet<String>> {
    // permissive sibling of the loader's schema: only tags matter here
    #[derive(Deserialize)]
    struct TagsOnly {
        #[serde(default)]
        tags: Vec<String>,
    }

    let mut used = BTreeSet::new();
    if !notes_root.is_dir() {
        return Ok(used);
    }

    for entry in WalkDir::new(notes_root).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Unable to walk the notes root: {}", notes_root.display()))?;
        if entry.file_name() != INFO_FILE_NAME || !entry.file_type().is_file() {
            continue;
        }

        let text = fs::read_to_string(entry.path())?;
        let info: TagsOnly = serde_yaml::from_str(&text)
            .with_context(|| format!("Malformed page metadata: {}", entry.path().display()))?;
        used.extend(info.tags);
    }

    Ok(used)
}
