use crate::commands::create;
use crate::error::{Result, VaultzError};
use crate::model::NoteRef;
use crate::vault::Vault;
use tracing::info;

/// Replace or append to an existing note's body, stamping `modified`.
///
/// With `create_if_missing`, a missing title falls back to `create`.
pub fn run(
    vault: &Vault,
    title: &str,
    content: &str,
    append: bool,
    create_if_missing: bool,
) -> Result<NoteRef> {
    let Some(path) = vault.locate(title) else {
        if create_if_missing {
            return create::run(vault, title, content, None, &[]);
        }
        return Err(VaultzError::NoteNotFound(title.to_string()));
    };

    let mut note = vault.load(&path)?;
    if append {
        note.body = format!("{}\n\n{}", note.body.trim_end(), content);
    } else {
        note.body = content.to_string();
    }
    note.metadata.touch();
    vault.write(&note)?;

    info!(title, append, "note updated");
    Ok(NoteRef::of(&note))
}
