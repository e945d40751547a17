use crate::error::{Result, VaultzError};
use crate::model::{Note, NoteRef};
use crate::vault::Vault;
use tracing::info;

/// Create a new note, optionally under a folder and with initial tags.
///
/// Fails with `NoteExists` if the target file is already present; never
/// overwrites. The folder hierarchy is created as needed.
pub fn run(
    vault: &Vault,
    title: &str,
    content: &str,
    folder: Option<&str>,
    tags: &[String],
) -> Result<NoteRef> {
    let abs = vault.note_path(title, folder);
    if abs.exists() {
        return Err(VaultzError::NoteExists {
            title: title.to_string(),
            path: vault.rel(&abs),
        });
    }

    let mut note = Note::new(title, vault.rel(&abs), content);
    if !tags.is_empty() {
        note.metadata.set_tags(tags.to_vec());
    }
    note.metadata
        .insert("created", chrono::Utc::now().to_rfc3339());
    vault.write(&note)?;

    info!(title, path = %note.path.display(), "note created");
    Ok(NoteRef::of(&note))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn creates_note_with_frontmatter() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        let created = run(
            &vault,
            "Meeting Notes",
            "Agenda\n",
            Some("Work/Projects"),
            &["meeting".to_string()],
        )
        .unwrap();

        assert_eq!(created.path, PathBuf::from("Work/Projects/Meeting Notes.md"));
        let note = vault.resolve("Meeting Notes").unwrap();
        assert_eq!(note.body, "Agenda\n");
        assert_eq!(note.tags(), vec!["meeting".to_string()]);
        assert!(!note.metadata.created().is_empty());
    }

    #[test]
    fn existing_note_is_never_overwritten() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A.md"), "original").unwrap();
        let vault = Vault::new(dir.path());

        let err = run(&vault, "A", "new", None, &[]).unwrap_err();
        assert!(matches!(err, VaultzError::NoteExists { .. }));
        assert_eq!(
            fs::read_to_string(dir.path().join("A.md")).unwrap(),
            "original"
        );
    }

    #[test]
    fn no_tags_means_no_tags_key() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        run(&vault, "Plain", "text", None, &[]).unwrap();
        let note = vault.resolve("Plain").unwrap();
        assert!(note.metadata.get("tags").is_none());
    }
}
