//! Internal link rewriting on rendered HTML.
//!
//! Every `<img>` gets its `src` absolutized and every `<a>` gets its
//! `href` absolutized plus a forced `target="_blank"`. Absolute
//! `http(s)://` references pass through unchanged; site-relative ones are
//! joined onto the configured site URL (and the page's own route when the
//! reference is page-relative).
//!
//! The patterns match the attribute shapes `pulldown-cmark` emits, which
//! is the only HTML this module ever sees.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a href="([^"]*)"([^>]*)>"#).unwrap());

static RE_IMG_SRC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"<img src="([^"]*)""#).unwrap());

/// Rewrite `<img src>` and `<a href>` attributes in rendered HTML.
pub fn rewrite_internal_links(rendered: &str, rel_path: &str, site_url: &str) -> String {
    let rendered = RE_IMG_SRC.replace_all(rendered, |caps: &Captures| {
        format!(
            r#"<img src="{}""#,
            internal_link(&caps[1], rel_path, site_url)
        )
    });

    RE_ANCHOR
        .replace_all(&rendered, |caps: &Captures| {
            format!(
                r#"<a href="{}"{} target="_blank">"#,
                internal_link(&caps[1], rel_path, site_url),
                &caps[2]
            )
        })
        .into_owned()
}

/// Resolve one link value against the site URL and the page's route.
///
/// Duplicate, leading and trailing slashes are stripped while joining.
pub fn internal_link(link: &str, rel_path: &str, site_url: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        return link.to_owned();
    }

    let mut parts: Vec<&str> = vec![site_url];

    // no leading slash: the reference is relative to the current page
    if !link.starts_with('/') {
        parts.push(rel_path);
    }
    parts.push(link);

    parts
        .into_iter()
        .map(|part| part.trim_matches('/'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
