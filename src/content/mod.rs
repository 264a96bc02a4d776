//! Markdown → HTML content pipeline.
//!
//! Page content goes through three stages:
//!
//! 1. line-level social embed rewrites ([`embed`]) on the raw Markdown,
//! 2. Markdown conversion via `pulldown-cmark`,
//! 3. internal link rewriting ([`links`]) on the rendered HTML.

pub mod embed;
pub mod links;

use pulldown_cmark::{Options, Parser, html};

/// Render one page's Markdown source to final HTML.
pub fn render_page_content(source: &str, rel_path: &str, site_url: &str, gist_label: &str) -> String {
    let source = embed::rewrite_social_lines(source, gist_label);
    let rendered = markdown_to_html(&source);

    links::rewrite_internal_links(&rendered, rel_path, site_url)
}

/// Convert Markdown to HTML.
///
/// Autolinks stay disabled on purpose: a bare URL mid-sentence must
/// remain plain text, only whole-line markers become embeds.
fn markdown_to_html(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(source, options);

    let mut rendered = String::with_capacity(source.len() * 2);
    html::push_html(&mut rendered, parser);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_basics() {
        let rendered = markdown_to_html("# Hi\n\nsome *text*");
        assert!(rendered.contains("<h1>Hi</h1>"));
        assert!(rendered.contains("<em>text</em>"));
    }

    #[test]
    fn test_bare_url_stays_plain_text() {
        let rendered = markdown_to_html("watch https://youtu.be/abc123 later");
        assert!(!rendered.contains("<a "));
    }

    #[test]
    fn test_full_pipeline_rewrites_relative_image() {
        let rendered = render_page_content(
            "![pic](image.png)",
            "projects/valhalla",
            "https://example.com",
            "Gist",
        );
        assert!(
            rendered.contains(r#"<img src="https://example.com/projects/valhalla/image.png""#),
            "got: {rendered}"
        );
    }

    #[test]
    fn test_full_pipeline_embeds_whole_line_video() {
        let rendered = render_page_content(
            "intro\n\nhttps://youtu.be/abc123\n\noutro",
            "notes/demo",
            "https://example.com",
            "Gist",
        );
        assert!(rendered.contains(r#"src="https://www.youtube.com/embed/abc123""#));
    }
}
