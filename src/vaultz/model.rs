use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A metadata value as stored in a note's frontmatter block.
///
/// Vault files in the wild hold tag-like fields either as a bare scalar
/// (`tags: work`) or as a list (`tags: [work, rust]`). This enum keeps both
/// shapes representable; [`Metadata::tags`] is the normalization point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Scalar(String),
    List(Vec<String>),
}

impl MetaValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            MetaValue::Scalar(s) => Some(s),
            MetaValue::List(_) => None,
        }
    }

    /// View any value as a list: a scalar becomes a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            MetaValue::Scalar(s) => vec![s.clone()],
            MetaValue::List(items) => items.clone(),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Scalar(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Scalar(s)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(items: Vec<String>) -> Self {
        MetaValue::List(items)
    }
}

/// The frontmatter key-value map of a note.
///
/// Keys serialize in lexicographic order so repeated encode/decode cycles
/// never reorder a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata(pub BTreeMap<String, MetaValue>);

impl Metadata {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.0.iter()
    }

    /// The note's tag set, normalized to a list.
    pub fn tags(&self) -> Vec<String> {
        self.get("tags").map(MetaValue::to_list).unwrap_or_default()
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.insert("tags", tags);
    }

    /// The `created` scalar, or an empty string when absent.
    pub fn created(&self) -> String {
        self.get("created")
            .and_then(|v| v.as_scalar())
            .unwrap_or_default()
            .to_string()
    }

    /// Stamp `modified` with the current UTC time.
    pub fn touch(&mut self) {
        self.insert("modified", chrono::Utc::now().to_rfc3339());
    }
}

/// One markdown file in the vault.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    /// File stem; the resolution key within the vault.
    pub title: String,
    /// Location relative to the vault root. Stable until a move.
    pub path: PathBuf,
    /// Markdown content after the metadata block.
    pub body: String,
    pub metadata: Metadata,
}

impl Note {
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            body: body.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn tags(&self) -> Vec<String> {
        self.metadata.tags()
    }
}

/// A `(title, path)` pair identifying one member of a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRef {
    pub title: String,
    pub path: PathBuf,
}

impl NoteRef {
    pub fn of(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            path: note.path.clone(),
        }
    }
}

/// One full-text search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub path: PathBuf,
    pub snippet: String,
    pub tags: Vec<String>,
}

/// One entry in a tag/folder listing.
#[derive(Debug, Clone, Serialize)]
pub struct NoteSummary {
    pub title: String,
    pub path: PathBuf,
    pub tags: Vec<String>,
    pub created: String,
}

/// How a related note connects to the source note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Connection {
    Backlink,
    SharedTags,
}

/// A derived relation between the source note and one other note.
#[derive(Debug, Clone, Serialize)]
pub struct Relation {
    pub title: String,
    pub path: PathBuf,
    pub connection: Connection,
    pub shared_tags: Vec<String>,
}

/// A directory under the vault root with its direct note count.
#[derive(Debug, Clone, Serialize)]
pub struct FolderInfo {
    pub path: PathBuf,
    pub note_count: usize,
}
