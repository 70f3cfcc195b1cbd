//! Shared primitives for pattern-based extractors.
//!
//! Every language module is built from the same small toolkit: iterate all
//! non-overlapping matches of a pattern over the full file text, convert a
//! match offset into a 1-based line number, pull a capture group with a
//! default, and approximate the end line of a declaration body.

use regex::{Captures, Regex};

/// Iterate all non-overlapping matches of `re` over `text`, yielding the
/// byte offset of each whole match together with its capture groups.
pub fn each_match<'t>(
    re: &'t Regex,
    text: &'t str,
) -> impl Iterator<Item = (usize, Captures<'t>)> + 't {
    re.captures_iter(text)
        .map(|caps| (caps.get(0).map_or(0, |m| m.start()), caps))
}

/// 1-based line number of a byte offset, computed by counting newlines in
/// the text preceding it.
pub fn line_of(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}

/// Capture group as `&str`, empty string when the group did not participate.
pub fn capture<'t>(caps: &Captures<'t>, group: usize) -> &'t str {
    caps.get(group).map_or("", |m| m.as_str())
}

/// Capture group as a trimmed owned string, `None` when absent or blank.
pub fn opt_capture(caps: &Captures<'_>, group: usize) -> Option<String> {
    let s = capture(caps, group).trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// 1-based line of the `}` closing the first `{` at or after `from`.
///
/// Depth counting only; string literals and comments are not tracked, which
/// is acceptable for the approximate extraction this crate does. A `;`
/// before any `{` means the declaration has no body (`struct Unit;`,
/// prototypes, arrow expressions), so the end is the start line. Falls back
/// to the line of `from` when no balanced block is found.
pub fn brace_block_end(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let start = from.min(bytes.len());
    let open = match bytes[start..].iter().position(|b| *b == b'{' || *b == b';') {
        Some(i) if bytes[start + i] == b'{' => i,
        _ => return line_of(text, from),
    };
    let mut depth = 0usize;
    for (i, b) in bytes[start + open..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return line_of(text, start + open + i);
                }
            }
            _ => {}
        }
    }
    line_of(text, from)
}

/// 1-based line of the last line belonging to an indentation-delimited block
/// whose header starts at `header_offset` (Python-style bodies).
///
/// The block ends before the first non-blank line indented at or below the
/// header's indent. A header with no body ends on its own line.
pub fn indent_block_end(text: &str, header_offset: usize) -> usize {
    let header_line = line_of(text, header_offset);
    let lines: Vec<&str> = text.lines().collect();
    if header_line > lines.len() {
        return header_line;
    }
    let header_indent = indent_width(lines[header_line - 1]);

    let mut end = header_line;
    for (i, line) in lines.iter().enumerate().skip(header_line) {
        if line.trim().is_empty() {
            continue;
        }
        if indent_width(line) <= header_indent {
            break;
        }
        end = i + 1;
    }
    end
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Split a comma-separated name list, trimming and dropping empties.
/// Handles `a as b` aliases by keeping the written (left-hand) name.
pub fn split_name_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|part| {
            part.trim()
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_string()
        })
        .filter(|name| !name.is_empty() && name != "as")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_of_counts_newlines() {
        let text = "a\nb\nc";
        assert_eq!(line_of(text, 0), 1);
        assert_eq!(line_of(text, 2), 2);
        assert_eq!(line_of(text, 4), 3);
    }

    #[test]
    fn line_of_clamps_past_end() {
        assert_eq!(line_of("one\ntwo", 999), 2);
    }

    #[test]
    fn brace_block_end_matches_nesting() {
        let text = "fn f() {\n  if x {\n  }\n}\nfn g() {}\n";
        assert_eq!(brace_block_end(text, 0), 4);
    }

    #[test]
    fn brace_block_end_without_block() {
        let text = "const X = 1;\n";
        assert_eq!(brace_block_end(text, 0), 1);
    }

    #[test]
    fn indent_block_end_python_style() {
        let text = "def f():\n    a = 1\n    return a\n\ndef g():\n    pass\n";
        assert_eq!(indent_block_end(text, 0), 3);
    }

    #[test]
    fn indent_block_end_empty_body() {
        let text = "def f(): pass\nx = 1\n";
        assert_eq!(indent_block_end(text, 0), 1);
    }

    #[test]
    fn split_name_list_handles_aliases() {
        assert_eq!(
            split_name_list("foo, bar as baz , qux"),
            vec!["foo", "bar", "qux"]
        );
        assert!(split_name_list("  ").is_empty());
    }
}
