//! Text helpers shared by scraping, seed assembly and the importer.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PADDED_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *\n *").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Collapse scraped whitespace into readable paragraphs.
///
/// Carriage returns are dropped, runs of spaces and tabs collapse to one
/// space, spaces around newlines are stripped, and three or more newlines
/// become a single blank line. The result is trimmed.
///
/// # Examples
///
/// ```
/// use geosolutions_exporter::text::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("a  b\r\n\n \n\nc"), "a b\n\nc");
/// ```
#[must_use]
pub fn normalize_whitespace(value: &str) -> String {
    let no_cr = value.replace('\r', "");
    let spaced = SPACE_RUNS.replace_all(&no_cr, " ");
    let tight = PADDED_NEWLINES.replace_all(&spaced, "\n");
    let squeezed = NEWLINE_RUNS.replace_all(&tight, "\n\n");
    squeezed.trim().to_string()
}

/// Clamp a string to `max_chars` characters, appending `...` when cut.
///
/// Strings at or under the limit come back unchanged. The ellipsis counts
/// toward the limit, so limits of three or fewer return a plain cut.
#[must_use]
pub fn clamp_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }
    let cut: String = value.chars().take(max_chars - 3).collect();
    format!("{}...", cut.trim_end())
}

/// Make a name safe as a local file name.
///
/// Every character outside `[A-Za-z0-9._-]` becomes an underscore.
#[must_use]
pub fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// First `max_chars` characters of a string, for error-message excerpts.
#[must_use]
pub fn excerpt(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_collapses_spaces_and_tabs() {
        assert_eq!(normalize_whitespace("one\t\t two   three"), "one two three");
    }

    #[test]
    fn test_normalize_strips_carriage_returns() {
        assert_eq!(normalize_whitespace("line\r\nnext"), "line\nnext");
    }

    #[test]
    fn test_normalize_caps_blank_lines() {
        assert_eq!(normalize_whitespace("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_trims_space_around_newlines() {
        // Newlines padded with spaces still collapse to one blank line.
        assert_eq!(normalize_whitespace("a \n \n \nb"), "a\n\nb");
    }

    #[test]
    fn test_clamp_short_text_unchanged() {
        assert_eq!(clamp_text("hello", 60), "hello");
        assert_eq!(clamp_text("exact", 5), "exact");
    }

    #[test]
    fn test_clamp_appends_ellipsis() {
        assert_eq!(clamp_text("a very very long headline", 10), "a very...");
    }

    #[test]
    fn test_clamp_never_exceeds_limit() {
        let clamped = clamp_text("abcdefghijklmnop", 10);
        assert!(clamped.chars().count() <= 10);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let once = clamp_text("a very very long headline", 10);
        assert_eq!(clamp_text(&once, 10), once);
    }

    #[test]
    fn test_clamp_tiny_limits_cut_plain() {
        assert_eq!(clamp_text("abcdef", 3), "abc");
        assert_eq!(clamp_text("abcdef", 0), "");
    }

    #[test]
    fn test_clamp_handles_multibyte_text() {
        // Char-based counting, so multibyte input never splits a character.
        let clamped = clamp_text("Tūhoe whenua whakahirahira rawa atu", 10);
        assert!(clamped.ends_with("..."));
        assert!(clamped.chars().count() <= 10);
    }

    #[test]
    fn test_safe_file_name_replaces_specials() {
        assert_eq!(safe_file_name("hero banner (1).jpg"), "hero_banner__1_.jpg");
        assert_eq!(safe_file_name("plain-name_ok.png"), "plain-name_ok.png");
    }

    #[test]
    fn test_excerpt_cuts_on_chars() {
        assert_eq!(excerpt("abcdef", 4), "abcd");
        assert_eq!(excerpt("ab", 4), "ab");
    }
}
