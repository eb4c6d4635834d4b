//! core/naming.rs
//! Title cleanup, output file names, and the display title derived back from a file name.
//!
//! The file name rule and `display_title` must stay exact inverses for clean titles:
//! `display_title(&track_file_name(i, t)) == t`.

/// Characters that never make it into a file name.
const FORBIDDEN: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

const EXTENSION: &str = ".mp3";
const SEPARATOR: &str = " - ";

fn is_decoration(c: char) -> bool {
    c.is_whitespace() || c == '|' || c == '-'
}

/// Strip leading `| -` decoration (and whitespace) from a title.
pub fn strip_leading_decoration(s: &str) -> &str {
    s.trim_start_matches(is_decoration)
}

/// Title as written into the tag: leading decoration removed, trimmed.
pub fn clean_title(title: &str) -> String {
    strip_leading_decoration(title).trim().to_string()
}

/// Make a title safe for use as a file name component.
///
/// Idempotent: `sanitize_title(&sanitize_title(s)) == sanitize_title(s)`.
pub fn sanitize_title(title: &str) -> String {
    let safe: String = title.chars().filter(|c| !FORBIDDEN.contains(c)).collect();
    strip_leading_decoration(safe.trim()).to_string()
}

/// `"{idx:02} - {sanitized title}.mp3"`
pub fn track_file_name(index: usize, title: &str) -> String {
    format!("{index:02}{SEPARATOR}{}{EXTENSION}", sanitize_title(title))
}

/// Display title for a produced file: everything after the first `" - "`,
/// minus the `.mp3` suffix.
pub fn display_title(file_name: &str) -> &str {
    let rest = file_name
        .split_once(SEPARATOR)
        .map(|(_, rest)| rest)
        .unwrap_or(file_name);
    rest.strip_suffix(EXTENSION).unwrap_or(rest)
}
