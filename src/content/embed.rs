//! Line-level social embed rewrites.
//!
//! A content line that starts with a recognized social URL is replaced
//! wholesale by an embed snippet before Markdown conversion. This is a
//! line-oriented heuristic, not a Markdown-aware transform: the same URL
//! mid-sentence is left alone.

const GIST_MARKER: &str = "https://gist.github.com/";

const YOUTUBE_MARKERS: [&str; 2] = ["https://www.youtube.com/watch?v=", "https://youtu.be/"];

/// Replace whole-line social URLs with embed snippets.
///
/// `gist_label` is the localized link text shown inside the gist script
/// tag for browsers without JavaScript.
pub fn rewrite_social_lines(content: &str, gist_label: &str) -> String {
    content
        .lines()
        .map(|line| rewrite_line(line, gist_label))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rewrite_line(line: &str, gist_label: &str) -> String {
    if line.starts_with(GIST_MARKER) {
        if let Some(embed) = gist_embed(line.trim(), gist_label) {
            return embed;
        }
    }

    for marker in YOUTUBE_MARKERS {
        if line.starts_with(marker) {
            let video_id = line.trim().trim_start_matches(marker);
            return youtube_embed(video_id);
        }
    }

    line.to_owned()
}

/// `https://gist.github.com/<owner>/<id>` → script-tag embed.
///
/// Lines that look like a gist URL but lack the `<owner>/<id>` shape are
/// left untouched.
fn gist_embed(line: &str, label: &str) -> Option<String> {
    let mut parts = line
        .trim_start_matches(GIST_MARKER)
        .split('/')
        .filter(|p| !p.is_empty());

    let owner = parts.next()?;
    let id = parts.next()?;

    Some(format!(
        r#"<script src="https://gist.github.com/{owner}/{id}.js">{label}</script>"#
    ))
}

/// YouTube watch/short URL → fixed-size iframe embed.
fn youtube_embed(video_id: &str) -> String {
    format!(
        r#"<iframe width="560" height="315" src="https://www.youtube.com/embed/{video_id}" frameborder="0" allow="accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_short_url_line() {
        let out = rewrite_social_lines("https://youtu.be/abc123", "Gist");
        assert!(out.starts_with("<iframe "));
        assert!(out.contains(r#"src="https://www.youtube.com/embed/abc123""#));
        assert!(out.contains(r#"width="560" height="315""#));
    }

    #[test]
    fn test_youtube_watch_url_line() {
        let out = rewrite_social_lines("https://www.youtube.com/watch?v=xyz", "Gist");
        assert!(out.contains(r#"src="https://www.youtube.com/embed/xyz""#));
    }

    #[test]
    fn test_midsentence_url_untouched() {
        let line = "see https://youtu.be/abc123 for details";
        assert_eq!(rewrite_social_lines(line, "Gist"), line);
    }

    #[test]
    fn test_gist_line() {
        let out = rewrite_social_lines("https://gist.github.com/alice/42abc", "Исходник");
        assert_eq!(
            out,
            r#"<script src="https://gist.github.com/alice/42abc.js">Исходник</script>"#
        );
    }

    #[test]
    fn test_malformed_gist_line_untouched() {
        let line = "https://gist.github.com/alice";
        assert_eq!(rewrite_social_lines(line, "Gist"), line);
    }

    #[test]
    fn test_other_lines_pass_through() {
        let content = "# Title\n\nplain text";
        assert_eq!(rewrite_social_lines(content, "Gist"), content);
    }
}
