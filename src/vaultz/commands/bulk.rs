//! Bulk mutator: tag edits, moves, and deletes over a planned selection,
//! behind a mandatory preview-before-commit protocol.
//!
//! Preview (`dry_run = true`) and commit are separate code paths; the
//! preview performs no I/O at all rather than rolling anything back. In
//! commit mode each item fails in isolation: an I/O error, malformed
//! metadata block, or move conflict is logged, reported, and excluded from
//! the applied count without aborting the remaining items.

use crate::commands::{apply_tag_changes, select};
use crate::commands::select::SelectionCriteria;
use crate::error::{Result, VaultzError};
use crate::model::NoteRef;
use crate::vault::Vault;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub enum BulkMutation {
    Tag {
        add: Vec<String>,
        remove: Vec<String>,
    },
    Move {
        destination: String,
    },
    Delete,
}

impl BulkMutation {
    fn kind(&self) -> &'static str {
        match self {
            BulkMutation::Tag { .. } => "tag",
            BulkMutation::Move { .. } => "move",
            BulkMutation::Delete => "delete",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            BulkMutation::Tag { add, remove } if add.is_empty() && remove.is_empty() => Err(
                VaultzError::InvalidCriteria("no tag changes requested".to_string()),
            ),
            BulkMutation::Move { destination } if destination.trim().is_empty() => Err(
                VaultzError::InvalidCriteria("move requires a destination folder".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// One item that could not be applied, with enough context to identify it.
#[derive(Debug, Clone, Serialize)]
pub struct BulkFailure {
    pub title: String,
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one bulk operation, preview or commit.
///
/// `selected` and `applied` differ exactly when items failed or were
/// skipped; callers surface the difference as partial-failure detail. A
/// preview reports the full selection with `applied = 0`.
#[derive(Debug, Serialize)]
pub struct BulkOutcome {
    pub affected: Vec<NoteRef>,
    pub selected: usize,
    pub applied: usize,
    pub dry_run: bool,
    pub failures: Vec<BulkFailure>,
}

/// Apply a mutation to an already-planned selection.
///
/// Mutation parameters are validated before any I/O. The selection is
/// trusted as-is: only the listed refs are ever touched, even if the vault
/// has changed since planning.
pub fn apply(
    vault: &Vault,
    selection: &[NoteRef],
    mutation: &BulkMutation,
    dry_run: bool,
) -> Result<BulkOutcome> {
    mutation.validate()?;

    if dry_run {
        info!(
            kind = mutation.kind(),
            selected = selection.len(),
            "bulk preview"
        );
        return Ok(BulkOutcome {
            affected: selection.to_vec(),
            selected: selection.len(),
            applied: 0,
            dry_run: true,
            failures: Vec::new(),
        });
    }

    let mut affected = Vec::new();
    let mut failures = Vec::new();
    for item in selection {
        match apply_one(vault, item, mutation) {
            Ok(applied_ref) => affected.push(applied_ref),
            Err(e) => {
                error!(
                    kind = mutation.kind(),
                    title = %item.title,
                    path = %item.path.display(),
                    error = %e,
                    "bulk item failed"
                );
                failures.push(BulkFailure {
                    title: item.title.clone(),
                    path: item.path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        kind = mutation.kind(),
        selected = selection.len(),
        applied = affected.len(),
        failed = failures.len(),
        "bulk commit completed"
    );
    Ok(BulkOutcome {
        selected: selection.len(),
        applied: affected.len(),
        affected,
        dry_run: false,
        failures,
    })
}

fn apply_one(vault: &Vault, item: &NoteRef, mutation: &BulkMutation) -> Result<NoteRef> {
    match mutation {
        BulkMutation::Tag { add, remove } => {
            let mut note = vault.load(&vault.abs(&item.path))?;
            let mut tags = note.tags();
            apply_tag_changes(&mut tags, add, remove);
            note.metadata.set_tags(tags);
            note.metadata.touch();
            vault.write(&note)?;
            Ok(NoteRef::of(&note))
        }
        BulkMutation::Move { destination } => vault.relocate(item, destination),
        BulkMutation::Delete => {
            vault.remove(&item.path)?;
            Ok(item.clone())
        }
    }
}

fn require_criteria(criteria: &SelectionCriteria) -> Result<()> {
    if criteria.is_empty() {
        return Err(VaultzError::InvalidCriteria(
            "bulk operations require selection criteria: note titles, tags, a folder, or a \
             content query"
                .to_string(),
        ));
    }
    Ok(())
}

/// Plan and tag in one call.
pub fn bulk_tag(
    vault: &Vault,
    criteria: &SelectionCriteria,
    add: Vec<String>,
    remove: Vec<String>,
    dry_run: bool,
) -> Result<BulkOutcome> {
    require_criteria(criteria)?;
    let mutation = BulkMutation::Tag { add, remove };
    mutation.validate()?;
    let selection = select::plan(vault, criteria);
    apply(vault, &selection, &mutation, dry_run)
}

/// Plan and move in one call.
pub fn bulk_move(
    vault: &Vault,
    criteria: &SelectionCriteria,
    destination: String,
    dry_run: bool,
) -> Result<BulkOutcome> {
    require_criteria(criteria)?;
    let mutation = BulkMutation::Move { destination };
    mutation.validate()?;
    let selection = select::plan(vault, criteria);
    apply(vault, &selection, &mutation, dry_run)
}

/// Plan and delete in one call.
///
/// Without `confirm`, commit mode downgrades to a preview that reports the
/// would-be victims: a safe no-op, not an error.
pub fn bulk_delete(
    vault: &Vault,
    criteria: &SelectionCriteria,
    confirm: bool,
    dry_run: bool,
) -> Result<BulkOutcome> {
    require_criteria(criteria)?;
    let selection = select::plan(vault, criteria);
    if !confirm && !dry_run {
        info!(
            selected = selection.len(),
            "unconfirmed bulk delete, reporting preview instead"
        );
    }
    apply(vault, &selection, &BulkMutation::Delete, dry_run || !confirm)
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

    fn all_in_folder(folder: &str) -> SelectionCriteria {
        SelectionCriteria {
            folder: Some(folder.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn tag_mutation_with_no_tags_is_invalid() {
        let (_dir, vault) = vault_with(&[("A.md", "a")]);
        let result = bulk_tag(
            &vault,
            &SelectionCriteria {
                note_titles: vec!["A".to_string()],
                ..Default::default()
            },
            Vec::new(),
            Vec::new(),
            true,
        );
        assert!(matches!(result, Err(VaultzError::InvalidCriteria(_))));
    }

    #[test]
    fn empty_criteria_are_rejected_before_io() {
        let (_dir, vault) = vault_with(&[("A.md", "a")]);
        let result = bulk_delete(&vault, &SelectionCriteria::default(), true, false);
        assert!(matches!(result, Err(VaultzError::InvalidCriteria(_))));
    }

    #[test]
    fn dry_run_reports_selection_without_writing() {
        let (dir, vault) = vault_with(&[("T/A.md", "a"), ("T/B.md", "b"), ("T/C.md", "c")]);
        let outcome = bulk_delete(&vault, &all_in_folder("T"), true, true).unwrap();
        assert_eq!(outcome.selected, 3);
        assert_eq!(outcome.applied, 0);
        assert!(outcome.dry_run);
        assert!(dir.path().join("T/A.md").exists());
        assert!(dir.path().join("T/B.md").exists());
        assert!(dir.path().join("T/C.md").exists());
    }

    #[test]
    fn unconfirmed_delete_is_a_reported_noop() {
        let (dir, vault) = vault_with(&[("T/A.md", "a")]);
        let outcome = bulk_delete(&vault, &all_in_folder("T"), false, false).unwrap();
        assert!(outcome.dry_run);
        assert_eq!(outcome.selected, 1);
        assert_eq!(outcome.applied, 0);
        assert!(dir.path().join("T/A.md").exists());
    }

    #[test]
    fn committed_delete_removes_files() {
        let (dir, vault) = vault_with(&[("T/A.md", "a"), ("T/B.md", "b")]);
        let outcome = bulk_delete(&vault, &all_in_folder("T"), true, false).unwrap();
        assert_eq!(outcome.applied, 2);
        assert!(!dir.path().join("T/A.md").exists());
        assert!(!dir.path().join("T/B.md").exists());
    }

    #[test]
    fn tag_commit_adds_without_duplicates_and_stamps_modified() {
        let (dir, vault) = vault_with(&[("T/A.md", "---\ntags:\n- work\n---\n\na")]);
        bulk_tag(
            &vault,
            &all_in_folder("T"),
            vec!["work".to_string(), "rust".to_string()],
            Vec::new(),
            false,
        )
        .unwrap();
        // A second application changes nothing.
        bulk_tag(
            &vault,
            &all_in_folder("T"),
            vec!["rust".to_string()],
            Vec::new(),
            false,
        )
        .unwrap();

        let note = vault.load(&dir.path().join("T/A.md")).unwrap();
        assert_eq!(note.tags(), vec!["work".to_string(), "rust".to_string()]);
        assert!(note.metadata.get("modified").is_some());
    }

    #[test]
    fn move_conflict_skips_item_and_keeps_source() {
        let (dir, vault) = vault_with(&[
            ("T/A.md", "moving a"),
            ("T/B.md", "moving b"),
            ("Dest/A.md", "already here"),
        ]);
        let outcome =
            bulk_move(&vault, &all_in_folder("T"), "Dest".to_string(), false).unwrap();

        assert_eq!(outcome.selected, 2);
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].title, "A");
        // The conflicting note stayed put, untouched on both ends.
        assert_eq!(
            fs::read_to_string(dir.path().join("T/A.md")).unwrap(),
            "moving a"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("Dest/A.md")).unwrap(),
            "already here"
        );
        // The clean one moved.
        assert!(dir.path().join("Dest/B.md").exists());
        assert!(!dir.path().join("T/B.md").exists());
    }

    #[test]
    fn malformed_note_fails_in_isolation() {
        let (dir, vault) = vault_with(&[
            ("T/Bad.md", "---\nouter:\n  inner: 1\n---\nbody"),
            ("T/Good.md", "body"),
        ]);
        let criteria = SelectionCriteria {
            note_titles: vec!["Bad".to_string(), "Good".to_string()],
            ..Default::default()
        };
        let outcome = bulk_tag(
            &vault,
            &criteria,
            vec!["x".to_string()],
            Vec::new(),
            false,
        )
        .unwrap();

        assert_eq!(outcome.selected, 2);
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].title, "Bad");
        let good = vault.load(&dir.path().join("T/Good.md")).unwrap();
        assert_eq!(good.tags(), vec!["x".to_string()]);
    }

    #[test]
    fn mutation_stays_inside_the_selection_snapshot() {
        let (dir, vault) = vault_with(&[("T/A.md", "a")]);
        let selection = select::plan(&vault, &all_in_folder("T"));
        // A note that appears after planning is not part of the selection.
        fs::write(dir.path().join("T/Late.md"), "late").unwrap();

        let outcome = apply(&vault, &selection, &BulkMutation::Delete, false).unwrap();
        assert_eq!(outcome.applied, 1);
        assert!(dir.path().join("T/Late.md").exists());
    }

    #[test]
    fn move_reports_new_path_for_applied_items() {
        let (_dir, vault) = vault_with(&[("T/A.md", "a")]);
        let outcome =
            bulk_move(&vault, &all_in_folder("T"), "Dest".to_string(), false).unwrap();
        assert_eq!(outcome.affected[0].path, PathBuf::from("Dest/A.md"));
    }
}
