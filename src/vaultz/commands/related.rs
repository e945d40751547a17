//! Relation resolver: backlinks and shared tags between one note and the
//! rest of the vault.
//!
//! The backlink test is a literal substring search for the `[[Title]]`
//! token, not a link-syntax parser. Cost is O(notes × body length), which
//! is fine at personal-vault scale.

use crate::error::Result;
use crate::model::{Connection, Relation};
use crate::vault::Vault;
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub fn run(vault: &Vault, title: &str, limit: usize) -> Result<Vec<Relation>> {
    debug!(title, limit, "find related started");
    let source = vault.resolve(title)?;
    let source_tags: BTreeSet<String> = source.tags().into_iter().collect();
    let link_token = format!("[[{title}]]");

    let mut related = Vec::new();
    for path in vault.walk(None) {
        if related.len() == limit {
            break;
        }
        if vault.rel(&path) == source.path {
            continue;
        }
        let note = match vault.load(&path) {
            Ok(note) => note,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable note");
                continue;
            }
        };

        let has_backlink = note.body.contains(&link_token);
        let shared_tags: Vec<String> = note
            .tags()
            .into_iter()
            .collect::<BTreeSet<String>>()
            .intersection(&source_tags)
            .cloned()
            .collect();

        if has_backlink || !shared_tags.is_empty() {
            // Backlink wins the classification when both hold.
            let connection = if has_backlink {
                Connection::Backlink
            } else {
                Connection::SharedTags
            };
            related.push(Relation {
                title: note.title,
                path: note.path,
                connection,
                shared_tags,
            });
        }
    }

    debug!(results = related.len(), "find related completed");
    Ok(related)
}
