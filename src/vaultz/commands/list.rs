//! Tag/folder filtered note listing: the search traversal without the
//! content test.

use crate::commands::tag_filter_matches;
use crate::model::NoteSummary;
use crate::vault::Vault;
use tracing::{debug, warn};

pub fn run(
    vault: &Vault,
    tag_filter: &[String],
    folder: Option<&str>,
    limit: usize,
) -> Vec<NoteSummary> {
    debug!(?tag_filter, ?folder, limit, "list started");
    let mut results = Vec::new();

    for path in vault.walk(folder) {
        if results.len() == limit {
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

        results.push(NoteSummary {
            title: note.title,
            path: note.path,
            tags: note_tags,
            created: note.metadata.created(),
        });
    }

    debug!(results = results.len(), "list completed");
    results
}
