//! Project page writer.

use crate::config::BlogMetadata;
use crate::generator::{base_context, copy_page_attachments, write_page_file};
use crate::log;
use crate::page::{BlogPages, PageRecord};
use anyhow::Result;
use minijinja::context;

pub fn write_projects(pages: &BlogPages, metadata: &BlogMetadata) -> Result<()> {
    log!("projects"; "building {} projects", pages.projects.len());

    for project in &pages.projects {
        write_project(project, metadata)?;
    }

    Ok(())
}

fn write_project(page: &PageRecord, metadata: &BlogMetadata) -> Result<()> {
    let base = base_context(metadata, &page.title, &page.description, &page.rel_path, true);
    let rendered = metadata.templates.render(
        "project.html",
        context! {
            page => page,
            page_text => page.content,
            stacks => metadata.stacks,
            ..base
        },
    )?;

    let folder = write_page_file(&metadata.paths.output, &page.rel_path, &rendered)?;
    copy_page_attachments(page, &folder)
}
