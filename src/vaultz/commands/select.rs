//! Selection planner: resolves a heterogeneous criterion into a concrete,
//! ordered set of notes.
//!
//! The planned set is a snapshot, not a live view; a second call re-scans
//! the filesystem. Bulk mutations operate only on the refs planned here,
//! so a note that appears after planning is never touched.

use crate::commands::tag_filter_matches;
use crate::model::NoteRef;
use crate::vault::Vault;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Caller-supplied rule for which notes a bulk operation targets.
///
/// Explicit titles take precedence; when present, the other filters are
/// ignored. Otherwise filters compose: folder scope, then tag OR-filter,
/// then content query (AND).
#[derive(Debug, Clone, Default)]
pub struct SelectionCriteria {
    pub note_titles: Vec<String>,
    pub tags: Vec<String>,
    pub folder: Option<String>,
    pub query: Option<String>,
}

impl SelectionCriteria {
    pub fn is_empty(&self) -> bool {
        self.note_titles.is_empty()
            && self.tags.is_empty()
            && self.folder.is_none()
            && self.query.is_none()
    }
}

/// Plan the selection for the given criteria.
///
/// Deterministic for a fixed vault state: explicit titles resolve in the
/// order given (unresolved ones silently dropped, duplicates collapsed);
/// filter-based selection follows traversal order.
pub fn plan(vault: &Vault, criteria: &SelectionCriteria) -> Vec<NoteRef> {
    debug!(?criteria, "planning selection");

    if !criteria.note_titles.is_empty() {
        let mut seen = HashSet::new();
        return criteria
            .note_titles
            .iter()
            .filter(|title| seen.insert(title.as_str()))
            .filter_map(|title| {
                vault.locate(title).map(|path| NoteRef {
                    title: title.clone(),
                    path: vault.rel(&path),
                })
            })
            .collect();
    }

    let needle = criteria.query.as_ref().map(|q| q.to_lowercase());
    let mut selected = Vec::new();

    for path in vault.walk(criteria.folder.as_deref()) {
        let note = match vault.load(&path) {
            Ok(note) => note,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable note");
                continue;
            }
        };

        if !criteria.tags.is_empty() && !tag_filter_matches(&criteria.tags, &note.tags()) {
            continue;
        }
        if let Some(needle) = &needle {
            if !note.body.to_lowercase().contains(needle) {
                continue;
            }
        }

        selected.push(NoteRef::of(&note));
    }

    debug!(selected = selected.len(), "selection planned");
    selected
}
