//! Patch engine - applies one suggestion's changes to source text
//!
//! Changes are resolved to concrete byte ranges, stable-sorted by start
//! offset, checked for overlap, and spliced into a new string in one pass.
//! Overlap always means a rule-authoring defect, so it fails loudly instead
//! of guessing a precedence.

use thiserror::Error;

use sift_ast::SyntaxTree;

use crate::{Change, Suggestion};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("overlapping changes: [{first_start}, {first_end}) and [{second_start}, {second_end})")]
    Overlap {
        first_start: u32,
        first_end: u32,
        second_start: u32,
        second_end: u32,
    },
    #[error("change range [{start}, {end}) is inverted")]
    InvertedRange { start: u32, end: u32 },
    #[error("change range [{start}, {end}) is out of bounds for source of length {len}")]
    OutOfBounds { start: u32, end: u32, len: usize },
    #[error("change range [{start}, {end}) does not fall on character boundaries")]
    NotCharBoundary { start: u32, end: u32 },
}

/// Apply one suggestion's changes to `source`, producing the rewritten text.
pub fn apply_suggestion(
    source: &str,
    tree: &SyntaxTree,
    suggestion: &Suggestion,
) -> Result<String, PatchError> {
    apply_changes(source, tree, &suggestion.changes())
}

/// Apply a list of changes to `source`.
///
/// Ranges may be given in any order but must be pairwise non-overlapping.
/// Zero-width ranges are insertions; several at the same offset apply in the
/// given order. An empty list returns the input unchanged.
pub fn apply_changes(
    source: &str,
    tree: &SyntaxTree,
    changes: &[Change],
) -> Result<String, PatchError> {
    if changes.is_empty() {
        return Ok(source.to_string());
    }

    let mut resolved: Vec<(u32, u32, &str)> = Vec::with_capacity(changes.len());
    for change in changes {
        let (start, end, text) = match change {
            Change::ReplaceNode { node, text } => {
                let span = tree.span(*node);
                (span.start, span.end, text.as_str())
            }
            Change::ReplaceRange { start, end, text } => (*start, *end, text.as_str()),
        };
        validate_range(source, start, end)?;
        resolved.push((start, end, text));
    }

    // Stable sort keeps equal-offset insertions in the given order.
    resolved.sort_by_key(|&(start, _, _)| start);

    for pair in resolved.windows(2) {
        let (first_start, first_end, _) = pair[0];
        let (second_start, second_end, _) = pair[1];
        if first_end > second_start {
            return Err(PatchError::Overlap {
                first_start,
                first_end,
                second_start,
                second_end,
            });
        }
    }

    let grown: usize = resolved.iter().map(|&(_, _, text)| text.len()).sum();
    let mut out = String::with_capacity(source.len() + grown);
    let mut cursor = 0usize;
    for (start, end, text) in resolved {
        out.push_str(&source[cursor..start as usize]);
        out.push_str(text);
        cursor = end as usize;
    }
    out.push_str(&source[cursor..]);
    Ok(out)
}

fn validate_range(source: &str, start: u32, end: u32) -> Result<(), PatchError> {
    if start > end {
        return Err(PatchError::InvertedRange { start, end });
    }
    if end as usize > source.len() {
        return Err(PatchError::OutOfBounds {
            start,
            end,
            len: source.len(),
        });
    }
    if !source.is_char_boundary(start as usize) || !source.is_char_boundary(end as usize) {
        return Err(PatchError::NotCharBoundary { start, end });
    }
    Ok(())
}
