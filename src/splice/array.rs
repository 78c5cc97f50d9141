use regex::Regex;

use super::SpliceError;

/// Characters of surrounding text quoted in error messages
const CONTEXT_CHARS: usize = 100;

/// First-level entries of an array literal and the span of its brackets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayContent {
    /// Bare identifiers and whole object literals, in source order
    pub entries: Vec<String>,
    /// Byte offset of the opening `[`
    pub start: usize,
    /// Byte offset of the closing `]` (inclusive)
    pub end: usize,
}

fn closing_for(open: u8) -> u8 {
    match open {
        b'[' => b']',
        b'{' => b'}',
        _ => b')',
    }
}

/// Largest char boundary of `s` not above `index`.
fn floor_boundary(s: &str, mut index: usize) -> usize {
    index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Up to [`CONTEXT_CHARS`] bytes on each side of `index`.
fn context_around(content: &str, index: usize) -> String {
    let from = floor_boundary(content, index.saturating_sub(CONTEXT_CHARS));
    let to = floor_boundary(content, index.saturating_add(CONTEXT_CHARS));
    content[from..to].to_string()
}

fn preview(content: &str) -> String {
    format!("{}...", &content[..floor_boundary(content, CONTEXT_CHARS)])
}

/// Push the comma separated bare entries of `part`.
fn flush_bare(entries: &mut Vec<String>, part: &str) {
    entries.extend(
        part.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    );
}

/// Extract the entries of the array literal that starts at the first match of
/// `start`.
///
/// The anchor should match up to and including the opening `[`, e.g.
/// `controllers\s*:\s*\[`. Bare entries are split on commas; object literals
/// directly inside the array are kept verbatim as single entries, whatever they
/// contain.
///
/// # Errors
///
/// Fails when the anchor does not match, a bracket other than `[` opens first,
/// brackets are unbalanced, or the array is never closed.
pub fn first_level_array_extract(start: &Regex, content: &str) -> Result<ArrayContent, SpliceError> {
    let anchor = start.find(content).ok_or_else(|| SpliceError::AnchorNotFound {
        pattern: start.as_str().to_string(),
        preview: preview(content),
    })?;

    let bytes = content.as_bytes();
    let mut stack: Vec<u8> = Vec::new();
    let mut entries = Vec::new();
    let mut array_start = 0;
    // start of the text not yet turned into entries
    let mut pending = 0;

    for (i, &c) in bytes.iter().enumerate().skip(anchor.start()) {
        match c {
            b'[' | b'{' | b'(' => {
                if stack.is_empty() {
                    if c != b'[' {
                        return Err(SpliceError::ExpectedOpenBracket { found: c as char });
                    }
                    array_start = i;
                    pending = i + 1;
                }
                if c == b'{' && stack.len() == 1 {
                    flush_bare(&mut entries, &content[pending..i]);
                    pending = i;
                }
                stack.push(c);
            }
            b']' | b'}' | b')' => {
                let Some(&open) = stack.last() else {
                    continue;
                };
                if closing_for(open) != c {
                    return Err(SpliceError::BracketMismatch {
                        open: open as char,
                        close: c as char,
                        context: context_around(content, i),
                    });
                }
                if stack.len() == 2 {
                    if c != b'}' {
                        return Err(SpliceError::ExpectedObjectClose { found: c as char });
                    }
                    entries.push(content[pending..=i].to_string());
                    pending = i + 1;
                }
                stack.pop();
                if stack.is_empty() {
                    flush_bare(&mut entries, &content[pending..i]);
                    return Ok(ArrayContent {
                        entries,
                        start: array_start,
                        end: i,
                    });
                }
            }
            _ => {}
        }
    }

    Err(SpliceError::ArrayEndNotFound {
        preview: preview(content),
    })
}

/// Replace the bracket span of `array` in `content` with `[` + entries joined by
/// `, ` + `]`. Text outside the span is kept byte for byte.
pub fn replace_in_content(content: &str, array: &ArrayContent) -> String {
    format!(
        "{}[{}]{}",
        &content[..array.start],
        array.entries.join(", "),
        &content[array.end + 1..]
    )
}
