//! Business logic for each vault operation, one module per command.
//!
//! Commands operate on a [`crate::vault::Vault`] and return plain data
//! types; nothing in here writes to stdout or assumes a terminal.

pub mod bulk;
pub mod create;
pub mod daily;
pub mod delete;
pub mod list;
pub mod related;
pub mod search;
pub mod select;
pub mod tagging;
pub mod update;

/// OR-semantics tag filter: at least one requested tag must be present.
pub(crate) fn tag_filter_matches(filter: &[String], note_tags: &[String]) -> bool {
    filter.iter().any(|tag| note_tags.contains(tag))
}

/// Apply add/remove tag edits in place. Additions skip tags already
/// present; removals win when a tag appears in both lists.
pub(crate) fn apply_tag_changes(tags: &mut Vec<String>, add: &[String], remove: &[String]) {
    for tag in add {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags.retain(|tag| !remove.contains(tag));
}
