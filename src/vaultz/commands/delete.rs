use crate::error::Result;
use crate::model::NoteRef;
use crate::vault::Vault;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub note: NoteRef,
    pub deleted: bool,
}

/// Delete one note by title.
///
/// Without `confirm` this is a safe no-op that reports what would be
/// deleted. A missing title is surfaced as `NoteNotFound` either way.
pub fn run(vault: &Vault, title: &str, confirm: bool) -> Result<DeleteOutcome> {
    let note = vault.resolve(title)?;
    let note_ref = NoteRef::of(&note);

    if !confirm {
        info!(title, path = %note_ref.path.display(), "unconfirmed delete, nothing removed");
        return Ok(DeleteOutcome {
            note: note_ref,
            deleted: false,
        });
    }

    vault.remove(&note.path)?;
    info!(title, "note deleted");
    Ok(DeleteOutcome {
        note: note_ref,
        deleted: true,
    })
}
