//! Filesystem helpers shared by the loaders and writers.
//!
//! Every helper reports failures with the offending path attached, so a
//! broken build always names the file it choked on.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// UTF-8 byte-order mark, tolerated at the start of content files.
const BOM: &str = "\u{feff}";

/// Read a text file, stripping a leading UTF-8 BOM if present.
pub fn read_to_string(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Unable to read a file: {}", path.display()))?;

    Ok(match text.strip_prefix(BOM) {
        Some(stripped) => stripped.to_owned(),
        None => text,
    })
}

/// Write a file, creating it if missing and truncating otherwise.
pub fn make_file(path: &Path, data: &str) -> Result<()> {
    fs::write(path, data).with_context(|| format!("Unable to make a file: {}", path.display()))
}

/// Create a directory (and its parents) if it does not exist yet.
pub fn make_folder(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Unable to make a folder: {}", path.display()))?;
    }
    Ok(())
}

/// Copy a single file, creating the target's parent directory as needed.
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        make_folder(parent)?;
    }

    fs::copy(source, target).with_context(|| {
        format!(
            "Unable to copy \"{}\" to: {}",
            source.display(),
            target.display()
        )
    })?;
    Ok(())
}

/// Copy a directory tree, preserving its structure.
pub fn copy_tree(source: &Path, target: &Path) -> Result<()> {
    make_folder(target)?;

    for entry in list_dir(source)? {
        let entry_target = target.join(entry.file_name().unwrap_or_default());

        if entry.is_dir() {
            copy_tree(&entry, &entry_target)?;
        } else {
            copy_file(&entry, &entry_target)?;
        }
    }

    Ok(())
}

/// List directory entries sorted by name.
///
/// `read_dir` order is platform-dependent; sorting keeps rebuilds
/// byte-identical.
pub fn list_dir(path: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("Unable to read a folder: {}", path.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Unable to read a folder: {}", path.display()))?;

    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.md");
        fs::write(&path, "\u{feff}# Title").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), "# Title");
    }

    #[test]
    fn test_read_without_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.md");
        fs::write(&path, "# Title").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), "# Title");
    }

    #[test]
    fn test_copy_tree_preserves_structure() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("assets");
        fs::create_dir_all(source.join("css")).unwrap();
        fs::write(source.join("css/site.css"), "body {}").unwrap();
        fs::write(source.join("favicon.ico"), "icon").unwrap();

        let target = dir.path().join("out");
        copy_tree(&source, &target).unwrap();

        assert_eq!(
            fs::read_to_string(target.join("css/site.css")).unwrap(),
            "body {}"
        );
        assert_eq!(fs::read_to_string(target.join("favicon.ico")).unwrap(), "icon");
    }

    #[test]
    fn test_list_dir_is_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();

        let names: Vec<_> = list_dir(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    }
}
