//! Page records and the classified page buckets.

mod loader;
mod route;
mod walker;

pub use loader::load_page;
pub use route::page_route;
pub use walker::{is_page_folder, walk_pages};

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// Content file name inside a page folder.
pub const CONTENT_FILE_NAME: &str = "index.md";
/// Metadata file name inside a page folder; its presence makes a folder a page.
pub const INFO_FILE_NAME: &str = "index.yaml";

/// Sub-folder of the pages root holding notes.
pub const NOTES_FOLDER_NAME: &str = "notes";
/// Sub-folder of the pages root holding projects.
pub const PROJECTS_FOLDER_NAME: &str = "projects";

/// One page folder's worth of content, immutable once loaded.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    /// Absolute source folder path (identity key for the run)
    pub folder_path: PathBuf,
    /// Last path segment; empty for the pages root itself
    pub folder_name: String,
    /// Forward-slash route relative to the pages root; empty for the root
    pub rel_path: String,

    pub title: String,
    pub description: String,
    /// Creation date; `NaiveDateTime::MIN` when the metadata omits it
    #[serde(serialize_with = "serialize_created")]
    pub created: NaiveDateTime,
    /// Opaque flags such as `no-rss` or `no-sitemap`
    pub options: Vec<String>,
    /// Tag vocabulary keys (notes only)
    pub tags: Vec<String>,
    /// Stack vocabulary keys (projects only)
    pub stacks: Vec<String>,

    /// File names in the folder besides the content and metadata files
    pub attachments: Vec<String>,
    /// Content file rendered to HTML
    pub content: String,
}

impl PageRecord {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Dates reach templates as `YYYY-MM-DD HH:MM` strings.
fn serialize_created<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&dt.format("%Y-%m-%d %H:%M"))
}

/// The three buckets produced by the tree walk.
///
/// Lists are unordered; writers impose their own ordering.
#[derive(Debug, Clone, Default)]
pub struct BlogPages {
    pub texts: Vec<PageRecord>,
    pub notes: Vec<PageRecord>,
    pub projects: Vec<PageRecord>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::NaiveDate;

    /// A minimal note-like record for writer and pagination tests.
    pub fn note(name: &str, day: u32, tags: &[&str]) -> PageRecord {
        PageRecord {
            folder_path: PathBuf::from(format!("/pages/notes/{name}")),
            folder_name: name.to_owned(),
            rel_path: format!("notes/{name}"),
            title: name.to_uppercase(),
            description: format!("about {name}"),
            created: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            options: Vec::new(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            stacks: Vec::new(),
            attachments: Vec::new(),
            content: format!("<p>{name}</p>"),
        }
    }
}
