//! Text page writer.
//!
//! A text is any page outside the notes and projects areas; it renders
//! at its own route with the `text.html` template.

use crate::config::BlogMetadata;
use crate::generator::{base_context, copy_page_attachments, write_page_file};
use crate::log;
use crate::page::{BlogPages, PageRecord};
use anyhow::Result;
use minijinja::context;

pub fn write_texts(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    log!("texts"; "building {} texts", pages.texts.len());

    for text in &pages.texts {
        write_text(text, metadata)?;
    }

    Ok(())
}

fn write_text(page: &PageRecord, metadata: &BlogMetadata) -> Result<()> {
    let base = base_context(metadata, &page.title, &page.description, &page.rel_path, true);
    let rendered = metadata.templates.render(
        "text.html",
        context! {
            page => page,
            page_text => page.content,
            ..base
        },
    )?;

    let folder = write_page_file(&metadata.paths.output, &page.rel_path, &rendered)?;
    copy_page_attachments(page, &folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tests::test_metadata;
    use crate::page::test_support::note;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_text_renders_and_copies_attachments() {
        let dir = TempDir::new().unwrap();
        let metadata = test_metadata(dir.path(), None);
        fs::create_dir_all(dir.path().join(".skin/templates")).unwrap();
        fs::write(
            dir.path().join(".skin/templates/text.html"),
            "<title>{{ page_title }}</title>{{ page_text }}",
        )
        .unwrap();

        let mut page = note("about", 1, &[]);
        page.rel_path = "about".to_owned();
        page.folder_path = dir.path().join("pages/about");
        page.attachments = vec!["cv.pdf".to_owned()];
        fs::create_dir_all(&page.folder_path).unwrap();
        fs::write(page.folder_path.join("cv.pdf"), b"pdf").unwrap();

        let pages = BlogPages {
            texts: vec![page],
            ..BlogPages::default()
        };
        write_texts(&pages, &metadata).unwrap();

        let html = fs::read_to_string(metadata.paths.output.join("about/index.html")).unwrap();
        assert!(html.contains("<title>ABOUT</title>"));
        assert!(html.contains("<p>about</p>"));
        assert!(metadata.paths.output.join("about/cv.pdf").is_file());
    }
}
