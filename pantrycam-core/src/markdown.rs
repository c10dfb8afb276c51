use regex::Regex;
use std::sync::OnceLock;

fn h3_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^### (.*)$").expect("valid h3 regex"))
}

fn h2_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^## (.*)$").expect("valid h2 regex"))
}

fn h1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^# (.*)$").expect("valid h1 regex"))
}

fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\* (.*)$").expect("valid list item regex"))
}

fn divider_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^---$").expect("valid divider regex"))
}

fn strong_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid strong regex"))
}

fn em_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*(.+?)\*").expect("valid emphasis regex"))
}

/// Minimal markdown to HTML.
///
/// Rules run once each, in this order: headings (`###`, `##`, `#`), `* ` list
/// items (a run of consecutive items gets one `<ul>`), `---` dividers,
/// `**strong**`, `*em*`, then every non-empty line that does not already start
/// with a tag becomes a paragraph. Nothing is re-scanned, so markup produced by
/// an earlier rule is never rewritten by a later one except for inline emphasis.
pub fn markdown_to_html(input: &str) -> String {
    let text = input.replace("\r\n", "\n");

    let text = h3_re().replace_all(&text, "<h3>$1</h3>");
    let text = h2_re().replace_all(&text, "<h2>$1</h2>");
    let text = h1_re().replace_all(&text, "<h1>$1</h1>");
    let text = list_item_re().replace_all(&text, "<li>$1</li>");
    let text = wrap_list_runs(&text);
    let text = divider_re().replace_all(&text, "<hr>");
    let text = strong_re().replace_all(&text, "<strong>$1</strong>");
    let text = em_re().replace_all(&text, "<em>$1</em>");

    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.starts_with('<') {
                Some(trimmed.to_string())
            } else {
                Some(format!("<p>{trimmed}</p>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_list_runs(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut in_list = false;
    for line in text.lines() {
        let is_item = line.starts_with("<li>");
        if is_item && !in_list {
            out.push("<ul>");
        } else if !is_item && in_list {
            out.push("</ul>");
        }
        in_list = is_item;
        out.push(line);
    }
    if in_list {
        out.push("</ul>");
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_list_and_strong() {
        let html = markdown_to_html("## Title\n* a\n* b\n**bold**");
        assert_eq!(
            html,
            "<h2>Title</h2>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<strong>bold</strong>"
        );
        assert_eq!(html.matches("<ul>").count(), 1);
    }

    #[test]
    fn heading_levels_do_not_overlap() {
        let html = markdown_to_html("# One\n## Two\n### Three");
        assert_eq!(html, "<h1>One</h1>\n<h2>Two</h2>\n<h3>Three</h3>");
    }

    #[test]
    fn separate_runs_get_separate_lists() {
        let html = markdown_to_html("* a\ntext\n* b");
        assert_eq!(
            html,
            "<ul>\n<li>a</li>\n</ul>\n<p>text</p>\n<ul>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn divider_and_emphasis() {
        let html = markdown_to_html("---\nsome *soft* and **hard** words");
        assert_eq!(
            html,
            "<hr>\n<p>some <em>soft</em> and <strong>hard</strong> words</p>"
        );
    }

    #[test]
    fn dashes_inside_text_are_not_a_divider() {
        assert_eq!(markdown_to_html("a --- b"), "<p>a --- b</p>");
    }

    #[test]
    fn blank_lines_are_dropped() {
        assert_eq!(markdown_to_html("one\n\n\ntwo\n"), "<p>one</p>\n<p>two</p>");
    }
}
