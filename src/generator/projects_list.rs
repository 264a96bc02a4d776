//! Project list writer.
//!
//! A single unpaginated page at `projects/index.html`, newest project
//! first.

use crate::config::BlogMetadata;
use crate::generator::{base_context, write_page_file};
use crate::log;
use crate::page::{BlogPages, PROJECTS_FOLDER_NAME, PageRecord};
use anyhow::Result;
use minijinja::context;
use std::cmp::Reverse;

pub fn write_projects_list(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    log!("projects"; "building project list");

    let mut projects: Vec<&PageRecord> = pages.projects.iter().collect();
    projects.sort_by_key(|project| Reverse(project.created));

    let title = metadata.language_value("projects")?;
    let base = base_context(metadata, title, "", PROJECTS_FOLDER_NAME, false);

    let rendered = metadata.templates.render(
        "projects_list.html",
        context! {
            projects => projects,
            stacks => metadata.stacks,
            ..base
        },
    )?;

    write_page_file(&metadata.paths.output, PROJECTS_FOLDER_NAME, &rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tests::test_metadata;
    use crate::page::test_support::note;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_is_newest_first() {
        let dir = TempDir::new().unwrap();
        let metadata = test_metadata(dir.path(), None);
        fs::create_dir_all(dir.path().join(".skin/templates")).unwrap();
        fs::write(
            dir.path().join(".skin/templates/projects_list.html"),
            "{{ page_title }}:{% for p in projects %}{{ p.folder_name }};{% endfor %}",
        )
        .unwrap();

        let pages = BlogPages {
            projects: vec![note("older", 1, &[]), note("newer", 5, &[])],
            ..BlogPages::default()
        };
        write_projects_list(&pages, &metadata).unwrap();

        let html =
            fs::read_to_string(metadata.paths.output.join("projects/index.html")).unwrap();
        assert_eq!(html, "Projects:newer;older;");
    }
}
