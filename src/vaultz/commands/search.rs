//! Full-text search with snippet extraction.
//!
//! Matching is a case-insensitive substring test in traversal order; there
//! is no relevance ranking. One unreadable note never aborts the scan.

use crate::commands::tag_filter_matches;
use crate::model::SearchHit;
use crate::vault::Vault;
use tracing::{debug, warn};

/// Characters of context kept on each side of the first match.
const SNIPPET_CONTEXT: usize = 100;

pub fn run(
    vault: &Vault,
    query: &str,
    tag_filter: &[String],
    folder: Option<&str>,
    limit: usize,
) -> Vec<SearchHit> {
    debug!(query, ?tag_filter, ?folder, limit, "search started");
    let needle = query.to_lowercase();
    let mut hits = Vec::new();

    for path in vault.walk(folder) {
        if hits.len() == limit {
            break;
        }
        let note = match vault.load(&path) {
            Ok(note) => note,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable note");
                continue;
            }
        };

        let note_tags = note.tags();
        if !tag_filter.is_empty() && !tag_filter_matches(tag_filter, &note_tags) {
            continue;
        }
        if !note.body.to_lowercase().contains(&needle) {
            continue;
        }

        hits.push(SearchHit {
            title: note.title,
            path: note.path,
            snippet: extract_snippet(&note.body, query),
            tags: note_tags,
        });
    }

    debug!(results = hits.len(), "search completed");
    hits
}

/// Extract the text around the first case-insensitive match, truncated at
/// document bounds and marked with an ellipsis on truncated ends.
fn extract_snippet(content: &str, query: &str) -> String {
    let lower_content = content.to_lowercase();
    let lower_query = query.to_lowercase();

    let Some(idx) = lower_content.find(&lower_query) else {
        // Unreachable from `run` (the body already matched), kept as a
        // head-of-document fallback.
        return if content.len() > 200 {
            format!("{}...", &content[..ceil_boundary(content, 200)])
        } else {
            content.to_string()
        };
    };

    let start = floor_boundary(content, idx.saturating_sub(SNIPPET_CONTEXT));
    let end = ceil_boundary(content, idx + lower_query.len() + SNIPPET_CONTEXT);

    let mut snippet = content[start..end].to_string();
    if start > 0 {
        snippet = format!("...{snippet}");
    }
    if end < content.len() {
        snippet = format!("{snippet}...");
    }
    snippet
}

// Byte offsets computed on the lowercased text can land mid-codepoint in
// the original; clamp to the nearest char boundary instead of panicking.
fn floor_boundary(s: &str, mut idx: usize) -> usize {
    idx = idx.min(s.len());
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_boundary(s: &str, mut idx: usize) -> usize {
    idx = idx.min(s.len());
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vault_with(files: &[(&str, &str)]) -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        for (rel, contents) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        let vault = Vault::new(dir.path());
        (dir, vault)
    }

    #[test]
    fn matches_case_insensitively_with_snippet() {
        let (_dir, vault) = vault_with(&[(
            "Meeting.md",
            "---\ntags:\n- work\n---\n\nDiscuss FastAPI roadmap",
        )]);
        let hits = run(&vault, "fastapi", &[], None, 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Meeting");
        assert!(hits[0].snippet.contains("FastAPI"));
        assert_eq!(hits[0].tags, vec!["work".to_string()]);
    }

    #[test]
    fn respects_limit_in_traversal_order() {
        let (_dir, vault) = vault_with(&[
            ("A.md", "needle"),
            ("B.md", "needle"),
            ("C.md", "needle"),
        ]);
        let hits = run(&vault, "needle", &[], None, 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "A");
        assert_eq!(hits[1].title, "B");
    }

    #[test]
    fn tag_filter_excludes_unmatched_notes() {
        let (_dir, vault) = vault_with(&[
            ("A.md", "---\ntags:\n- work\n---\n\nshared text"),
            ("B.md", "---\ntags:\n- home\n---\n\nshared text"),
        ]);
        let hits = run(&vault, "shared", &["work".to_string()], None, 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "A");
    }

    #[test]
    fn folder_scope_limits_search() {
        let (_dir, vault) = vault_with(&[
            ("Work/A.md", "needle"),
            ("Home/B.md", "needle"),
        ]);
        let hits = run(&vault, "needle", &[], Some("Work"), 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "A");
    }

    #[test]
    fn missing_folder_is_empty_result() {
        let (_dir, vault) = vault_with(&[("A.md", "needle")]);
        assert!(run(&vault, "needle", &[], Some("Archive"), 10).is_empty());
    }

    #[test]
    fn malformed_note_is_skipped_not_fatal() {
        let (_dir, vault) = vault_with(&[
            ("Bad.md", "---\nouter:\n  inner: 1\n---\nneedle"),
            ("Good.md", "needle"),
        ]);
        let hits = run(&vault, "needle", &[], None, 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Good");
    }

    #[test]
    fn snippet_ellipsis_only_on_truncated_ends() {
        let long_head = "x".repeat(300);
        let contents = format!("{long_head} needle tail");
        let (_dir, vault) = vault_with(&[("Long.md", contents.as_str())]);
        let hits = run(&vault, "needle", &[], None, 10);
        let snippet = &hits[0].snippet;
        assert!(snippet.starts_with("..."));
        assert!(!snippet.ends_with("..."));
        assert!(snippet.contains("needle"));
    }

    #[test]
    fn snippet_handles_multibyte_content() {
        let contents = format!("{} needle {}", "é".repeat(120), "ü".repeat(120));
        let (_dir, vault) = vault_with(&[("Uni.md", contents.as_str())]);
        let hits = run(&vault, "NEEDLE", &[], None, 10);
        assert!(hits[0].snippet.contains("needle"));
    }
}
