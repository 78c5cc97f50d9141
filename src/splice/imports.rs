use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use super::SpliceError;

// 1: default import, 2: `{ ... }` list, 3: namespace import, 4: module identifier
#[allow(clippy::expect_used)]
static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"import(?:(?:(?:[ \n\t]+([^ *\n\t{},]+)[ \n\t]*(?:,|[ \n\t]+))?"#,
        r#"([ \n\t]*\{(?:[ \n\t]*[^ \n\t"'{}]+[ \n\t]*,?)+\})?[ \n\t]*)"#,
        r#"|[ \n\t]*\*[ \n\t]*as[ \n\t]+([^ \n\t{}]+)[ \n\t]+)"#,
        r#"from[ \n\t]*['"]([^'"\n]+)['"]"#,
    ))
    .expect("valid import regex")
});

/// One `import ... from '<module>'` statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStatement {
    /// `import Foo from ...`
    pub default_import: Option<String>,
    /// `import { a, b } from ...`, kept sorted
    pub destructured_exports: BTreeSet<String>,
    /// `import * as ns from ...`
    pub wildcard_import: Option<String>,
    pub module_identifier: String,
}

impl ImportStatement {
    /// `import { <exports> } from '<module>'`
    pub fn named<I, S>(module_identifier: impl Into<String>, exports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            destructured_exports: exports.into_iter().map(Into::into).collect(),
            module_identifier: module_identifier.into(),
            ..Self::default()
        }
    }

    /// Whether the identifier is a path (`./x`, `../y`, `/z`) rather than a package.
    pub fn is_relative(&self) -> bool {
        self.module_identifier.starts_with(['.', '/'])
    }

    /// Single-line source form.
    pub fn render(&self) -> String {
        let mut line = String::from("import ");
        if let Some(default) = &self.default_import {
            line.push_str(default);
            line.push(' ');
        }
        if !self.destructured_exports.is_empty() {
            if self.default_import.is_some() {
                line.push_str(", ");
            }
            let exports: Vec<&str> = self.destructured_exports.iter().map(String::as_str).collect();
            line.push_str(&format!("{{ {} }} ", exports.join(", ")));
        }
        if let Some(wildcard) = &self.wildcard_import {
            line.push_str(&format!("* as {wildcard} "));
        }
        line.push_str(&format!("from '{}';", self.module_identifier));
        line
    }
}

/// Import statements found in a text and the span they occupy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBlock {
    pub imports: Vec<ImportStatement>,
    /// From the start of the first statement to the end of the last one,
    /// including its `;`; `None` when the text has no imports
    pub span: Option<Range<usize>>,
}

fn non_empty(s: Option<regex::Match<'_>>) -> Option<String> {
    s.map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse every import statement in `content`.
pub fn extract_imports(content: &str) -> ImportBlock {
    let mut imports = Vec::new();
    let mut span: Option<Range<usize>> = None;
    for caps in IMPORT.captures_iter(content) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        // a statement's terminating `;` belongs to the block
        let end = if content[whole.end()..].starts_with(';') {
            whole.end() + 1
        } else {
            whole.end()
        };
        span = Some(match span {
            Some(range) => range.start..end,
            None => whole.start()..end,
        });

        let destructured_exports = caps
            .get(2)
            .map(|m| {
                m.as_str()
                    .replace(['{', '}'], "")
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        imports.push(ImportStatement {
            default_import: non_empty(caps.get(1)),
            destructured_exports,
            wildcard_import: non_empty(caps.get(3)),
            module_identifier: caps
                .get(4)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        });
    }
    ImportBlock { imports, span }
}

/// Merge statements importing from the same module.
///
/// Named exports are unioned. Differing default or namespace imports for one
/// module are a conflict. The result lists path imports before package imports,
/// each group ordered by module identifier.
///
/// # Errors
///
/// [`SpliceError::ConflictingDefaultImport`] or
/// [`SpliceError::ConflictingWildcardImport`].
pub fn merge_imports<I>(statements: I) -> Result<Vec<ImportStatement>, SpliceError>
where
    I: IntoIterator<Item = ImportStatement>,
{
    let mut by_module: BTreeMap<String, ImportStatement> = BTreeMap::new();
    for statement in statements {
        let Some(merged) = by_module.get_mut(&statement.module_identifier) else {
            by_module.insert(statement.module_identifier.clone(), statement);
            continue;
        };
        if let Some(default) = statement.default_import {
            match &merged.default_import {
                Some(existing) if existing != &default => {
                    return Err(SpliceError::ConflictingDefaultImport {
                        module: statement.module_identifier,
                        first: existing.clone(),
                        second: default,
                    });
                }
                _ => merged.default_import = Some(default),
            }
        }
        if let Some(wildcard) = statement.wildcard_import {
            match &merged.wildcard_import {
                Some(existing) if existing != &wildcard => {
                    return Err(SpliceError::ConflictingWildcardImport {
                        module: statement.module_identifier,
                        first: existing.clone(),
                        second: wildcard,
                    });
                }
                _ => merged.wildcard_import = Some(wildcard),
            }
        }
        merged.destructured_exports.extend(statement.destructured_exports);
    }

    let mut merged: Vec<ImportStatement> = by_module.into_values().collect();
    merged.sort_by(|a, b| {
        b.is_relative()
            .cmp(&a.is_relative())
            .then_with(|| a.module_identifier.cmp(&b.module_identifier))
    });
    Ok(merged)
}

/// One line per statement, joined by `\n`.
pub fn render_imports(statements: &[ImportStatement]) -> String {
    statements
        .iter()
        .map(ImportStatement::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Put `rendered` where `block` was found in `content`, or in front of it when
/// `content` had no imports.
pub fn splice_imports(content: &str, block: &ImportBlock, rendered: &str) -> String {
    match &block.span {
        Some(span) => format!("{}{}{}", &content[..span.start], rendered, &content[span.end..]),
        None if rendered.is_empty() => content.to_string(),
        None => format!("{rendered}\n{content}"),
    }
}
