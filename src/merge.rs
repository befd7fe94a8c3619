//! Line-level deduplication and word-boundary truncation of source texts.

use std::collections::HashSet;

/// Appended to text that had to be shortened.
pub const PLACEHOLDER: &str = " …";

/// Line boundaries: `\n`, `\r`, vertical tab, form feed, the
/// `\x1c`..`\x1e` separators, NEL, and the Unicode line and paragraph
/// separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Unicode whitespace plus the `\x1c`..`\x1f` separators.
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Merge per-source texts into one bounded string.
///
/// Every text is split into lines at any line boundary (a lone `\r`
/// included), each line is trimmed of whitespace, and empty lines
/// are dropped. A line is kept only the first time its exact trimmed text
/// appears, scanning `texts` in order. The kept lines are joined with
/// newlines and, if the result is longer than `max_chars` characters,
/// passed through [`shorten`].
pub fn merge<S: AsRef<str>>(texts: &[S], max_chars: usize) -> String {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for text in texts {
        let trimmed = text
            .as_ref()
            .split(is_line_break)
            .map(|line| line.trim_matches(is_space));
        for line in trimmed {
            if !line.is_empty() && seen.insert(line) {
                lines.push(line);
            }
        }
    }

    let merged = lines.join("\n");
    if merged.chars().count() > max_chars {
        shorten(&merged, max_chars)
    } else {
        merged
    }
}

/// Collapse whitespace and fit `text` into `width` characters.
///
/// Runs of whitespace, newlines and non-breaking spaces included, become
/// single spaces. If the collapsed text still does not fit, whole words
/// are kept while they leave room for [`PLACEHOLDER`], which is then
/// appended. Words are never split: when not even the first word fits,
/// the result is the bare ellipsis. A `width` too small for the placeholder yields `""`.
pub fn shorten(text: &str, width: usize) -> String {
    let words: Vec<&str> = text
        .split(is_space)
        .filter(|word| !word.is_empty())
        .collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let placeholder_len = PLACEHOLDER.chars().count();
    if width < placeholder_len {
        return String::new();
    }
    let budget = width - placeholder_len;

    let mut out = String::new();
    let mut used = 0;
    for word in words {
        let word_len = word.chars().count();
        let needed = if out.is_empty() { word_len } else { word_len + 1 };
        if used + needed > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        used += needed;
    }

    if out.is_empty() {
        return PLACEHOLDER.trim_start().to_owned();
    }
    out.push_str(PLACEHOLDER);
    out
}
