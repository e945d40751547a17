use crate::commands::apply_tag_changes;
use crate::error::{Result, VaultzError};
use crate::vault::Vault;
use tracing::info;

/// Add and/or remove tags on one note, returning the updated tag list.
///
/// Additions are idempotent and the resulting list holds no duplicates.
pub fn run(vault: &Vault, title: &str, add: &[String], remove: &[String]) -> Result<Vec<String>> {
    let path = vault
        .locate(title)
        .ok_or_else(|| VaultzError::NoteNotFound(title.to_string()))?;
    let mut note = vault.load(&path)?;

    let mut tags = note.tags();
    apply_tag_changes(&mut tags, add, remove);
    note.metadata.set_tags(tags.clone());
    note.metadata.touch();
    vault.write(&note)?;

    info!(title, ?tags, "tags updated");
    Ok(tags)
}
