//! Changed-file model and diff aggregation.
//!
//! `aggregate_diff` turns the per-file patches of a PR into a single
//! bounded string suitable as model input. Pure; file order is preserved
//! and files without a patch (binary or oversized upstream) are skipped.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Per-file truncation limit, in characters.
pub const PATCH_CHAR_LIMIT: usize = 8000;

/// Appended to a patch that was cut at [`PATCH_CHAR_LIMIT`].
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// A file changed in a pull request, as reported by the files endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedFile {
    #[serde(rename = "filename")]
    pub path: String,
    pub status: FileStatus,
    /// Unified-diff text; absent for binary or very large files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    #[serde(other)]
    Unchanged,
}

/// Build the aggregated diff: a `# File:` header per file, the
/// (possibly truncated) patch, and a blank-line separator.
pub fn aggregate_diff(files: &[ChangedFile]) -> String {
    let mut out = String::new();
    for file in files {
        let Some(patch) = file.patch.as_deref() else {
            continue;
        };
        out.push_str("# File: ");
        out.push_str(&file.path);
        out.push('\n');
        out.push_str(&truncate_patch(patch));
        out.push_str("\n\n");
    }
    out
}

/// Cut a patch at [`PATCH_CHAR_LIMIT`] characters, appending the marker.
///
/// Characters (not bytes) are the unit so the cut never lands inside a
/// UTF-8 sequence.
fn truncate_patch(patch: &str) -> Cow<'_, str> {
    match patch.char_indices().nth(PATCH_CHAR_LIMIT) {
        None => Cow::Borrowed(patch),
        Some((byte_index, _)) => {
            let mut cut = patch[..byte_index].to_owned();
            cut.push_str(TRUNCATION_MARKER);
            Cow::Owned(cut)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, patch: Option<&str>) -> ChangedFile {
        ChangedFile {
            path: path.to_owned(),
            status: FileStatus::Modified,
            patch: patch.map(str::to_owned),
        }
    }

    #[test]
    fn test_small_patches_reproduced_verbatim() {
        let files = vec![
            file("src/a.rs", Some("@@ -1 +1 @@\n-old\n+new")),
            file("src/b.rs", Some("@@ -2 +2 @@\n+added")),
        ];

        let diff = aggregate_diff(&files);
        assert_eq!(
            diff,
            "# File: src/a.rs\n@@ -1 +1 @@\n-old\n+new\n\n\
             # File: src/b.rs\n@@ -2 +2 @@\n+added\n\n"
        );
        assert!(!diff.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_oversized_patch_cut_at_limit_with_marker() {
        let patch: String = "x".repeat(PATCH_CHAR_LIMIT + 500);
        let files = vec![file("big.rs", Some(&patch))];

        let diff = aggregate_diff(&files);
        let entry = diff
            .strip_prefix("# File: big.rs\n")
            .and_then(|rest| rest.strip_suffix("\n\n"))
            .unwrap();

        let expected: String = patch.chars().take(PATCH_CHAR_LIMIT).collect();
        assert_eq!(entry, format!("{expected}{TRUNCATION_MARKER}"));
    }

    #[test]
    fn test_patch_exactly_at_limit_untouched() {
        let patch: String = "y".repeat(PATCH_CHAR_LIMIT);
        let files = vec![file("edge.rs", Some(&patch))];

        let diff = aggregate_diff(&files);
        assert!(!diff.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        // Multi-byte characters near the boundary must not split a sequence.
        let patch: String = "é".repeat(PATCH_CHAR_LIMIT + 10);
        let files = vec![file("unicode.rs", Some(&patch))];

        let diff = aggregate_diff(&files);
        assert!(diff.contains(TRUNCATION_MARKER));
        let entry_chars = diff
            .strip_prefix("# File: unicode.rs\n")
            .and_then(|rest| rest.strip_suffix("\n\n"))
            .unwrap()
            .chars()
            .count();
        assert_eq!(entry_chars, PATCH_CHAR_LIMIT + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn test_patchless_files_skipped_silently() {
        let files = vec![
            file("image.png", None),
            file("src/a.rs", Some("+real change")),
            file("huge.bin", None),
        ];

        let diff = aggregate_diff(&files);
        assert_eq!(diff, "# File: src/a.rs\n+real change\n\n");
    }

    #[test]
    fn test_all_patchless_yields_empty_string() {
        let files = vec![file("a.png", None), file("b.png", None)];
        assert_eq!(aggregate_diff(&files), "");
    }

    #[test]
    fn test_input_order_preserved() {
        let files = vec![
            file("z.rs", Some("+z")),
            file("a.rs", Some("+a")),
        ];

        let diff = aggregate_diff(&files);
        let z_at = diff.find("# File: z.rs").unwrap();
        let a_at = diff.find("# File: a.rs").unwrap();
        assert!(z_at < a_at);
    }

    #[test]
    fn test_changed_file_deserializes_from_files_endpoint_shape() {
        let raw = r#"{"filename": "src/lib.rs", "status": "modified", "patch": "+x"}"#;
        let parsed: ChangedFile = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.path, "src/lib.rs");
        assert_eq!(parsed.status, FileStatus::Modified);

        // Unknown statuses (e.g. "copied") fold into Unchanged.
        let raw = r#"{"filename": "a.rs", "status": "copied"}"#;
        let parsed: ChangedFile = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.status, FileStatus::Unchanged);
        assert!(parsed.patch.is_none());
    }
}
