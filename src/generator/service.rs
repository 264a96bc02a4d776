//! Service file writer: the 404 page and robots.txt.

use crate::config::BlogMetadata;
use crate::generator::base_context;
use crate::log;
use crate::utils::fs;
use anyhow::Result;
use minijinja::context;

pub fn write_service_files(metadata: &BlogMetadata) -> Result<()> {
    log!("service"; "building 404.html and robots.txt");

    write_404(metadata)?;
    write_robots(metadata)
}

fn write_404(metadata: &BlogMetadata) -> Result<()> {
    let title = metadata.language_value("page_404_title")?;
    let base = base_context(metadata, title, "", "", false);

    let rendered = metadata.templates.render("404.html", base)?;
    fs::make_file(&metadata.paths.output.join("404.html"), &rendered)
}

fn write_robots(metadata: &BlogMetadata) -> Result<()> {
    let rendered = metadata.templates.render(
        "robots.txt",
        context! {
            settings => metadata.settings,
            sitemap_url => format!("{}/sitemap.xml", metadata.settings.url),
        },
    )?;

    fs::make_file(&metadata.paths.output.join("robots.txt"), &rendered)
}
