//! Anchor-based text merges into user-owned files
//!
//! The merge is textual on purpose: it only touches the import block and the
//! anchor expression, and refuses to guess when either is missing.

use crate::error::{InstallError, Result};
use std::path::Path;

/// Anchor name reported when a file has no import statements
pub const IMPORT_BLOCK_ANCHOR: &str = "import block";

/// Whether `content` already renders `provider`
pub fn is_wrapped(content: &str, provider: &str) -> bool {
    let tag = format!("<{}", provider);
    content.match_indices(&tag).any(|(at, _)| {
        content[at + tag.len()..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c == '/' || c.is_whitespace())
    })
}

/// Whether `content` already imports `provider` by name, whatever the quoting
fn imports_provider(content: &str, provider: &str) -> bool {
    content.lines().map(str::trim).any(|line| {
        line.starts_with("import")
            && line
                .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                .any(|word| word == provider)
    })
}

/// Insert `import` after the last import statement and wrap the first `anchor`
/// that follows the import block in `<provider>...</provider>`.
///
/// `path` is only used for error reporting.
pub fn wrap_provider(
    content: &str,
    path: &Path,
    import: &str,
    anchor: &str,
    provider: &str,
) -> Result<String> {
    let not_found = |anchor: &str| InstallError::MergeAnchorNotFound {
        path: path.to_path_buf(),
        anchor: anchor.to_string(),
    };

    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let last_import = import_block_end(&lines).ok_or_else(|| not_found(IMPORT_BLOCK_ANCHOR))?;
    let head_len: usize = lines[..=last_import].iter().map(|l| l.len()).sum();
    let (head, tail) = content.split_at(head_len);

    let anchor_at = tail.find(anchor).ok_or_else(|| not_found(anchor))?;
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };

    let mut merged = String::with_capacity(content.len() + import.len() + 2 * provider.len() + 8);
    merged.push_str(head);
    let already_imported = content.lines().any(|line| line.trim() == import.trim())
        || imports_provider(head, provider);
    if !already_imported {
        if !head.ends_with('\n') {
            merged.push_str(newline);
        }
        merged.push_str(import);
        merged.push_str(newline);
    }
    merged.push_str(&tail[..anchor_at]);
    merged.push_str(&format!("<{provider}>{anchor}</{provider}>"));
    merged.push_str(&tail[anchor_at + anchor.len()..]);
    Ok(merged)
}

/// Index of the line ending the last import statement
fn import_block_end(lines: &[&str]) -> Option<usize> {
    let mut end = None;
    let mut open_statement = false;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.trim();
        if open_statement {
            if line.contains("from ") || line.ends_with(';') {
                open_statement = false;
                end = Some(idx);
            }
            continue;
        }
        if line.starts_with("import ") || line.starts_with("import{") {
            if is_complete_import(line) {
                end = Some(idx);
            } else {
                open_statement = true;
            }
        }
    }
    end
}

fn is_complete_import(line: &str) -> bool {
    line.contains(" from ")
        || line.contains("}from")
        || line.starts_with("import '")
        || line.starts_with("import \"")
        || line.ends_with(';')
}
