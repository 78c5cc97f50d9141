//! # Splice Module
//!
//! Structural edits of hand-maintained TypeScript files, so regenerated code can
//! be merged into them without touching anything outside the managed regions.
//!
//! - [`first_level_array_extract`] / [`replace_in_content`] - entries of one
//!   array literal such as `providers: [...]`, found by an anchor regex
//! - [`extract_imports`] / [`merge_imports`] / [`render_imports`] - the import
//!   block, merged per module and rendered in a canonical order
//! - [`extract_custom_section`] - hand-written code between marker comments
//!
//! Rendering is deterministic, so running a merge on its own output changes
//! nothing.

mod array;
mod imports;
mod sections;


use thiserror::Error;

pub use array::{first_level_array_extract, replace_in_content, ArrayContent};
pub use imports::{
    extract_imports, merge_imports, render_imports, splice_imports, ImportBlock, ImportStatement,
};
pub use sections::{
    extract_custom_section, section_end, section_start, SECTION_END_NOTE, SECTION_MARKER,
    SECTION_START_NOTE,
};

/// Failures of structural text edits
#[derive(Debug, Error)]
pub enum SpliceError {
    #[error("Could not find array start /{pattern}/ in {preview}")]
    AnchorNotFound { pattern: String, preview: String },
    #[error("Expected '[' but got '{found}'")]
    ExpectedOpenBracket { found: char },
    #[error("Expected '}}' but got '{found}'")]
    ExpectedObjectClose { found: char },
    #[error("Bracket mismatch {open} {close} in {context}")]
    BracketMismatch {
        open: char,
        close: char,
        context: String,
    },
    #[error("Could not find array end in {preview}")]
    ArrayEndNotFound { preview: String },
    #[error("Different default imports for module {module}: {first} and {second}")]
    ConflictingDefaultImport {
        module: String,
        first: String,
        second: String,
    },
    #[error("Different wildcard imports for module {module}: {first} and {second}")]
    ConflictingWildcardImport {
        module: String,
        first: String,
        second: String,
    },
}
