//! Plain-text preview derivation for card and row layouts.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[([^\]]*)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:[#>]+|[-*+]\s)|[*_`~]+").expect("valid symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const ELLIPSIS: char = '…';

/// Collapses note content into a single line of readable text.
///
/// Link syntax keeps its label, heading/quote/list markers and emphasis
/// symbols are dropped, whitespace runs become one space.
pub fn preview_text(content: &str) -> String {
    let without_links = MARKDOWN_LINK_RE.replace_all(content, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    WHITESPACE_RE
        .replace_all(&without_symbols, " ")
        .trim()
        .to_string()
}

/// Cuts `value` to at most `max_chars` characters, ending with `…` when cut.
pub fn truncate(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(max_chars - 1).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Greedy word wrap into at most `max_lines` lines of `width` characters.
///
/// Words longer than `width` are split. When text remains after the last
/// line, that line ends with `…`.
pub fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut overflowed = false;

    'words: for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while !chars.is_empty() {
            let gap = usize::from(current_len > 0);
            if current_len + gap + chars.len() <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.extend(chars.iter());
                current_len += gap + chars.len();
                break;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            } else {
                let rest = chars.split_off(width);
                lines.push(chars.iter().collect());
                chars = rest;
            }
            if lines.len() == max_lines {
                overflowed = true;
                break 'words;
            }
        }
    }

    if !overflowed && current_len > 0 {
        if lines.len() == max_lines {
            overflowed = true;
        } else {
            lines.push(current);
        }
    }

    if overflowed {
        if let Some(last) = lines.last_mut() {
            let kept = truncate(last, width.saturating_sub(1));
            *last = format!("{}{ELLIPSIS}", kept.trim_end_matches(ELLIPSIS));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{preview_text, truncate, wrap};

    #[test]
    fn preview_strips_markdown_and_collapses_whitespace() {
        let text = preview_text("# Title\n\n- [docs](https://example.com)\n**bold**   `code`");
        assert_eq!(text, "Title docs bold code");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn wrap_respects_width_and_line_budget() {
        let lines = wrap("one two three four five six", 9, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.chars().count() <= 9));
        assert!(lines[1].ends_with('…'));
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap("abcdefghij", 4, 5);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_without_overflow_has_no_ellipsis() {
        assert_eq!(wrap("short text", 20, 3), vec!["short text"]);
    }
}
