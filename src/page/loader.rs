//! Page folder loading.
//!
//! Turns one page folder (an `index.yaml` metadata document, an
//! `index.md` content file and any attachment files) into an immutable
//! [`PageRecord`]. Any malformed or unreadable input aborts the build
//! with the offending path.

use crate::config::BlogMetadata;
use crate::content::render_page_content;
use crate::page::{CONTENT_FILE_NAME, INFO_FILE_NAME, PageRecord, page_route};
use crate::utils::fs;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;

/// Raw `index.yaml` shape; only title and description are required.
/// Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct PageInfo {
    title: String,
    description: String,
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    stacks: Vec<String>,
}

/// Load one page folder into a [`PageRecord`].
pub fn load_page(folder: &Path, metadata: &BlogMetadata) -> Result<PageRecord> {
    let rel_path = page_route(folder, &metadata.paths.pages)?;

    let folder_name = if rel_path.is_empty() {
        String::new()
    } else {
        folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    let info = read_info(folder)?;
    let created = parse_created(info.created.as_deref(), folder)?;

    let source = fs::read_to_string(&folder.join(CONTENT_FILE_NAME))?;
    let gist_label = metadata
        .language
        .get("gist")
        .map_or("Gist", String::as_str);
    let content = render_page_content(&source, &rel_path, &metadata.settings.url, gist_label);

    let attachments = collect_attachments(folder)?;

    Ok(PageRecord {
        folder_path: folder.to_path_buf(),
        folder_name,
        rel_path,
        title: info.title,
        description: info.description,
        created,
        options: info.options,
        tags: info.tags,
        stacks: info.stacks,
        attachments,
        content,
    })
}

/// Read and parse the page's `index.yaml`.
fn read_info(folder: &Path) -> Result<PageInfo> {
    let path = folder.join(INFO_FILE_NAME);
    let text = fs::read_to_string(&path)?;

    serde_yaml::from_str(&text)
        .with_context(|| format!("Malformed page metadata: {}", path.display()))
}

/// Parse the optional `created` field.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]` and date-only values; an absent field
/// defaults to the minimum representable datetime so undated pages sort
/// last in reverse-chronological views.
fn parse_created(value: Option<&str>, folder: &Path) -> Result<NaiveDateTime> {
    let Some(value) = value else {
        return Ok(NaiveDateTime::MIN);
    };

    let value = value.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN))
        .with_context(|| {
            format!(
                "Invalid `created` value \"{value}\" in {}",
                folder.join(INFO_FILE_NAME).display()
            )
        })
}

/// Every regular file in the folder besides the two predefined names is
/// an attachment. Sorted so rebuilds stay byte-identical.
fn collect_attachments(folder: &Path) -> Result<Vec<String>> {
    let predefined = [CONTENT_FILE_NAME, INFO_FILE_NAME];

    let attachments = fs::list_dir(folder)?
        .into_iter()
        .filter(|path| path.is_file())
        .filter_map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .filter(|name| !predefined.contains(&name.as_str()))
        .collect();

    Ok(attachments)
}
