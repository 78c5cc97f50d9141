/// Prefix of the marker comments delimiting a hand-written code section
pub const SECTION_MARKER: &str = "//-$$$";

/// Trailing text of the opening marker line
pub const SECTION_START_NOTE: &str = "Start of custom code section. Do not change this comment.";

/// Trailing text of the closing marker line
pub const SECTION_END_NOTE: &str = "End of custom code section. Do not change this comment.";

/// Opening marker line of section `name`.
pub fn section_start(name: &str) -> String {
    format!("{SECTION_MARKER}<start-{name}> {SECTION_START_NOTE}")
}

/// Closing marker line of section `name`.
pub fn section_end(name: &str) -> String {
    format!("{SECTION_MARKER}<end-{name}> {SECTION_END_NOTE}")
}

/// Text between the `<start-name>` and `<end-name>` markers of `code`, trimmed.
///
/// The rest of the opening marker line is not part of the section. Returns
/// `None` when either marker is missing or they are out of order.
pub fn extract_custom_section(code: &str, name: &str) -> Option<String> {
    let start_tag = format!("{SECTION_MARKER}<start-{name}>");
    let end_tag = format!("{SECTION_MARKER}<end-{name}>");

    let tag_at = code.find(&start_tag)?;
    let after_tag = tag_at + start_tag.len();
    let body_start = code[after_tag..]
        .find('\n')
        .map_or(code.len(), |nl| after_tag + nl + 1);
    let body_end = body_start + code[body_start..].find(&end_tag)?;
    Some(code[body_start..body_end].trim().to_string())
}
