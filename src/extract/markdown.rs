//! Markdown page → [`Document`] conversion.
//!
//! Only the structure the index needs is recognized: optional front matter,
//! ATX headings (`#` through `######`), fenced code blocks, and enough inline
//! syntax to strip markup from the plain-text body.

use crate::types::{Document, HeadingLevel, Section};
use regex::Regex;
use std::sync::LazyLock;
use std::time::SystemTime;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").expect("heading pattern")
});
static IMAGE_OR_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("link pattern"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("html tag pattern"));
static BLOCK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:>+\s?)*(?:[-*+]\s+|\d+[.)]\s+)?").expect("block marker pattern")
});
static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*_]\s*){3,}$").expect("rule pattern"));

/// Parses a Markdown page.
///
/// The title comes from the front matter `title:` key, then the first level-1
/// heading, then the last segment of `id`. Each heading opens a section that
/// runs until the next heading of any level.
pub fn parse(id: &str, url: &str, text: &str, last_updated: SystemTime) -> Document {
    let (front_title, body) = split_front_matter(text);

    let mut content: Vec<String> = Vec::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<(String, HeadingLevel, Vec<String>)> = None;
    let mut first_h1: Option<String> = None;
    let mut fence: Option<(char, usize)> = None;

    for line in body.lines() {
        let trimmed = line.trim_start();

        if let Some(open) = fence {
            if closes_fence(trimmed, open) {
                fence = None;
            } else {
                push_line(&mut content, &mut current, line.trim_end().to_string());
            }
            continue;
        }
        if let Some(open) = fence_run(trimmed) {
            fence = Some(open);
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = u8::try_from(caps[1].len())
                .ok()
                .and_then(|n| HeadingLevel::try_from(n).ok());
            if let Some(level) = level {
                let heading = strip_inline(&caps[2]);
                if level == HeadingLevel::H1 && first_h1.is_none() && !heading.is_empty() {
                    first_h1 = Some(heading.clone());
                }
                if let Some(done) = current.take() {
                    sections.push(finish_section(done));
                }
                content.push(heading.clone());
                current = Some((heading, level, Vec::new()));
                continue;
            }
        }

        let plain = if RULE.is_match(line) {
            String::new()
        } else {
            strip_inline(line)
        };
        push_line(&mut content, &mut current, plain);
    }

    if let Some(done) = current.take() {
        sections.push(finish_section(done));
    }

    let title = front_title
        .or(first_h1)
        .unwrap_or_else(|| fallback_title(id));

    Document::new(id)
        .with_title(title)
        .with_url(url)
        .with_content(join_lines(&content))
        .with_last_updated(last_updated)
        .with_sections(sections)
}

/// Marker character and length of a leading run of at least three backticks or tildes.
fn fence_run(line: &str) -> Option<(char, usize)> {
    let marker = line.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = line.chars().take_while(|&c| c == marker).count();
    (len >= 3).then_some((marker, len))
}

/// A fence closes on a bare run of its own marker, at least as long as the opener.
fn closes_fence(line: &str, (marker, len): (char, usize)) -> bool {
    fence_run(line).is_some_and(|(c, n)| c == marker && n >= len && line.trim_end().len() == n)
}

fn push_line(
    content: &mut Vec<String>,
    current: &mut Option<(String, HeadingLevel, Vec<String>)>,
    line: String,
) {
    if let Some((_, _, lines)) = current {
        lines.push(line.clone());
    }
    content.push(line);
}

fn finish_section((heading, level, lines): (String, HeadingLevel, Vec<String>)) -> Section {
    Section::new(heading, join_lines(&lines), level)
}

/// Joins lines, keeping at most one blank line between paragraphs.
fn join_lines(lines: &[String]) -> String {
    let mut out = String::new();
    let mut blank_run = false;
    for line in lines {
        if line.trim().is_empty() {
            blank_run = true;
            continue;
        }
        if !out.is_empty() {
            out.push_str(if blank_run { "\n\n" } else { "\n" });
        }
        out.push_str(line);
        blank_run = false;
    }
    out
}

/// Removes inline Markdown and HTML markup from one line.
fn strip_inline(line: &str) -> String {
    let text = BLOCK_MARKER.replace(line, "");
    let text = IMAGE_OR_LINK.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, "");
    text.chars()
        .filter(|c| !matches!(c, '*' | '`'))
        .map(|c| if c == '|' { ' ' } else { c })
        .collect::<String>()
        .replace("~~", "")
        .trim()
        .to_string()
}

/// Splits a leading `---` fenced front matter block off the body, returning its
/// `title` value if present.
fn split_front_matter(text: &str) -> (Option<String>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (front_matter_title(front), body);
        }
        offset += line.len();
    }

    // Unterminated front matter is treated as ordinary text
    (None, text)
}

fn front_matter_title(front: &str) -> Option<String> {
    front.lines().find_map(|line| {
        let value = line.strip_prefix("title:")?.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// `concepts/jet-stream` → `jet-stream`
pub(super) fn fallback_title(id: &str) -> String {
    id.rsplit('/').next().unwrap_or(id).to_string()
}
