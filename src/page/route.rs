//! Content addressing: canonical page routes.
//!
//! A page's route is its forward-slash path relative to the pages root
//! (`"projects/valhalla"`); the pages root itself gets the empty route.
//! The route doubles as the output folder name and the canonical URL
//! path segment, so every writer derives URLs from the same value.

use anyhow::{Result, bail};
use std::path::Path;

/// Compute the route for a page folder.
///
/// Walks up from `folder` one segment at a time until the pages root is
/// reached. A folder that does not descend from the pages root is a
/// structural error, not a loop.
pub fn page_route(folder: &Path, pages_root: &Path) -> Result<String> {
    let mut current = folder;
    let mut segments: Vec<String> = Vec::new();

    while current != pages_root {
        let Some(name) = current.file_name() else {
            bail!(
                "Page folder is outside the pages root: {}",
                folder.display()
            );
        };
        segments.push(name.to_string_lossy().into_owned());

        let Some(parent) = current.parent() else {
            bail!(
                "Page folder is outside the pages root: {}",
                folder.display()
            );
        };
        current = parent;
    }

    segments.reverse();
    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_route_for_nested_folder() {
        let root = PathBuf::from("/blog/pages");
        let folder = root.join("projects").join("valhalla");

        assert_eq!(page_route(&folder, &root).unwrap(), "projects/valhalla");
    }

    #[test]
    fn test_route_for_pages_root_is_empty() {
        let root = PathBuf::from("/blog/pages");
        assert_eq!(page_route(&root, &root).unwrap(), "");
    }

    #[test]
    fn test_route_round_trips() {
        let root = PathBuf::from("/blog/pages");
        let folder = root.join("notes").join("2024").join("hello");

        let route = page_route(&folder, &root).unwrap();
        assert_eq!(root.join(&route), folder);
    }

    #[test]
    fn test_foreign_folder_fails_fast() {
        let root = PathBuf::from("/blog/pages");
        let foreign = PathBuf::from("/somewhere/else");

        assert!(page_route(&foreign, &root).is_err());
    }
}
