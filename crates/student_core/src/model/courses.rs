//! Text codec for the serialized `courses` column.
//!
//! # Responsibility
//! - Render an ordered course list into the bracketed, quoted list literal
//!   stored in `students.courses` (`['Math', 'CS']`).
//! - Parse that literal back on demand for callers that want a list.
//!
//! # Invariants
//! - Rendering is byte-compatible with rows already present in existing
//!   databases: `[]` when empty, `', '` between items.
//! - The read path never parses implicitly; `parse_courses_literal` is opt-in.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

const QUOTED_ITEM: &str = r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*""#;

static LIST_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s)^\[\s*(?:(?:{QUOTED_ITEM})(?:\s*,\s*(?:{QUOTED_ITEM}))*)?\s*\]$"
    ))
    .expect("valid list literal regex")
});
static QUOTED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("(?s){QUOTED_ITEM}")).expect("valid quoted item regex"));
// Control, format, private-use, unassigned and separator characters other
// than the plain space are written as code escapes.
static NON_PRINTABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[\p{Cc}\p{Cf}\p{Co}\p{Cn}\p{Zl}\p{Zp}\p{Zs}]--\x20]$")
        .expect("valid non-printable regex")
});

/// Renders courses as the stored list literal.
pub fn render_courses_literal(courses: &[String]) -> String {
    let items = courses
        .iter()
        .map(|course| quote_item(course))
        .collect::<Vec<_>>();
    format!("[{}]", items.join(", "))
}

/// Parses a stored list literal back into course names.
///
/// Returns `None` when `text` is not a list of quoted strings.
pub fn parse_courses_literal(text: &str) -> Option<Vec<String>> {
    let trimmed = text.trim();
    if !LIST_LITERAL_RE.is_match(trimmed) {
        return None;
    }

    QUOTED_ITEM_RE
        .find_iter(trimmed)
        .map(|item| {
            let quoted = item.as_str();
            let inner = &quoted[1..quoted.len() - 1];
            unescape_item(inner)
        })
        .collect()
}

fn quote_item(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_non_printable(c) => push_code_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn is_non_printable(ch: char) -> bool {
    let mut buf = [0u8; 4];
    NON_PRINTABLE_RE.is_match(ch.encode_utf8(&mut buf))
}

fn push_code_escape(out: &mut String, ch: char) {
    let code = u32::from(ch);
    // Writing into a String cannot fail.
    let _ = if code <= 0xff {
        write!(out, "\\x{code:02x}")
    } else if code <= 0xffff {
        write!(out, "\\u{code:04x}")
    } else {
        write!(out, "\\U{code:08x}")
    };
}

fn unescape_item(inner: &str) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next()? {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'x' => out.push(read_code_point(&mut chars, 2)?),
            'u' => out.push(read_code_point(&mut chars, 4)?),
            'U' => out.push(read_code_point(&mut chars, 8)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Some(out)
}

fn read_code_point(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    let code = u32::from_str_radix(&hex, 16).ok()?;
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::{parse_courses_literal, render_courses_literal};

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[test]
    fn renders_plain_list_literal() {
        assert_eq!(
            render_courses_literal(&owned(&["Math", "CS"])),
            "['Math', 'CS']"
        );
        assert_eq!(render_courses_literal(&[]), "[]");
    }

    #[test]
    fn switches_to_double_quotes_for_apostrophes() {
        assert_eq!(
            render_courses_literal(&owned(&["Hitchhiker's Guide"])),
            r#"["Hitchhiker's Guide"]"#
        );
        assert_eq!(
            render_courses_literal(&owned(&[r#"it's "quoted""#])),
            r#"['it\'s "quoted"']"#
        );
    }

    #[test]
    fn escapes_backslashes_and_control_characters() {
        assert_eq!(
            render_courses_literal(&owned(&["a\\b", "line\nbreak", "bell\u{7}"])),
            r"['a\\b', 'line\nbreak', 'bell\x07']"
        );
    }

    #[test]
    fn escapes_invisible_separators_and_format_characters() {
        assert_eq!(
            render_courses_literal(&owned(&[
                "a\u{a0}b",
                "z\u{200b}w",
                "x\u{2028}y",
                "ok\u{ad}q"
            ])),
            r"['a\xa0b', 'z\u200bw', 'x\u2028y', 'ok\xadq']"
        );
        assert_eq!(
            render_courses_literal(&owned(&["private\u{f0000}", "Intro to CS", "Café"])),
            r"['private\U000f0000', 'Intro to CS', 'Café']"
        );
    }

    #[test]
    fn parse_reverses_rendered_literals() {
        let courses = owned(&[
            "Math",
            "Hitchhiker's Guide",
            "tab\there",
            r"back\slash",
            "no\u{a0}break",
        ]);
        let literal = render_courses_literal(&courses);
        assert_eq!(parse_courses_literal(&literal), Some(courses));
        assert_eq!(parse_courses_literal("[]"), Some(Vec::new()));
    }

    #[test]
    fn parse_rejects_non_list_text() {
        assert_eq!(parse_courses_literal("Math, CS"), None);
        assert_eq!(parse_courses_literal("['Math' 'CS']"), None);
        assert_eq!(parse_courses_literal("[1, 2]"), None);
        assert_eq!(parse_courses_literal(r"['\x4']"), None);
    }
}
