//! Escaping for Typst markup and string literals
//!
//! Source text must come out as literal text: every character that would
//! start markup is backslash-escaped. Typst accepts `\` before any
//! non-whitespace character, so an escape never loses a character.

use std::borrow::Cow;

/// Characters that always start markup in Typst text
const ALWAYS: &[char] = &['\\', '*', '_', '#', '$', '`', '@', '<', '[', ']', '~'];

/// Escape source text for markup mode.
///
/// `line_start` tells whether the text begins at the start of a line (after
/// optional indentation). There, list, enum, term and heading markers
/// (`- `, `+ `, `/ `, `= `, `1. `) are escaped as well. The same check runs
/// after every newline inside the text.
///
/// `/` is escaped where it could join a neighbour into a comment token: at
/// either end of the text and before another `/`.
pub fn escape_text(text: &str, line_start: bool) -> Cow<'_, str> {
    if !needs_escape(text, line_start) {
        return Cow::Borrowed(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut at_line_start = line_start;
    let mut escape_dot_at = None;

    for (i, &c) in chars.iter().enumerate() {
        let next = chars.get(i + 1).copied();

        let escape = if ALWAYS.contains(&c) {
            true
        } else if c == '/' && (i == 0 || next.is_none() || next == Some('/')) {
            true
        } else if escape_dot_at == Some(i) {
            true
        } else if at_line_start {
            match c {
                '-' | '+' | '/' => ends_marker(next),
                '=' => {
                    let run = chars[i..].iter().take_while(|&&c| c == '=').count();
                    ends_marker(chars.get(i + run).copied())
                }
                '0'..='9' => {
                    let run = chars[i..].iter().take_while(|c| c.is_ascii_digit()).count();
                    if chars.get(i + run) == Some(&'.') && ends_marker(chars.get(i + run + 1).copied()) {
                        escape_dot_at = Some(i + run);
                    }
                    false
                }
                _ => false,
            }
        } else {
            false
        };

        if escape {
            out.push('\\');
        }
        out.push(c);

        at_line_start = match c {
            '\n' => true,
            ' ' | '\t' => at_line_start,
            _ => false,
        };
    }

    Cow::Owned(out)
}

/// Byte offset at which a backslash defuses the line-start marker heading
/// already escaped `text`, if it has one.
///
/// Leading spaces and tabs are skipped. The end of `text` counts as
/// whitespace, so a lone `-` is escaped as well.
pub fn line_marker_at(text: &str) -> Option<usize> {
    let body = text.trim_start_matches([' ', '\t']);
    let offset = text.len() - body.len();
    match body.chars().next()? {
        '-' | '+' | '/' => ends_marker(body[1..].chars().next()).then_some(offset),
        '=' => {
            let run = body.bytes().take_while(|&b| b == b'=').count();
            ends_marker(body[run..].chars().next()).then_some(offset)
        }
        '0'..='9' => {
            let run = body.bytes().take_while(u8::is_ascii_digit).count();
            let rest = body[run..].strip_prefix('.')?;
            ends_marker(rest.chars().next()).then_some(offset + run)
        }
        _ => None,
    }
}

fn ends_marker(next: Option<char>) -> bool {
    next.is_none_or(char::is_whitespace)
}

fn needs_escape(text: &str, line_start: bool) -> bool {
    line_start
        || text.contains('\n')
        || text.starts_with('/')
        || text.ends_with('/')
        || text.contains("//")
        || text.contains(ALWAYS)
}

/// Escape a value for a Typst string literal (`"..."`).
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Inline raw markup for code, or `None` when the code contains a backtick
/// and must go through `#raw("...")` instead.
pub fn inline_raw(code: &str) -> Option<String> {
    (!code.contains('`')).then(|| format!("`{code}`"))
}

/// `#raw("...")` call for code that cannot sit between backticks
pub fn raw_call(code: &str) -> String {
    format!("#raw(\"{}\")", escape_string(code))
}

/// Backtick fence for a code block: at least three, and longer than any
/// backtick run inside the code.
pub fn code_fence(code: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in code.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}
