//! Note repository: the filesystem-backed view of a vault.
//!
//! The vault directory itself is the index; there is no manifest or cache.
//! Every walk re-reads the tree, so external edits between calls are picked
//! up on the next operation. Traversal is depth-first with each directory's
//! entries visited in sorted order, which makes duplicate-title resolution
//! deterministic (first match in component-wise lexicographic path order).

use crate::error::{Result, VaultzError};
use crate::frontmatter;
use crate::model::{FolderInfo, Note, NoteRef};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

pub const NOTE_EXT: &str = "md";

pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazy walk over the note files under `folder` (or the whole vault).
    ///
    /// Hidden directories and non-note files are skipped. A missing folder
    /// yields an empty sequence, same as a folder with no notes.
    pub fn walk(&self, folder: Option<&str>) -> impl Iterator<Item = PathBuf> {
        let base = match folder {
            Some(f) => self.root.join(f),
            None => self.root.clone(),
        };
        WalkDir::new(base)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(|entry| entry.ok())
            .filter(|e| e.file_type().is_file() && has_note_ext(e.path()))
            .map(|e| e.into_path())
    }

    /// Find the file for a note title, first match in traversal order.
    pub fn locate(&self, title: &str) -> Option<PathBuf> {
        self.walk(None)
            .find(|path| path.file_stem().is_some_and(|stem| stem == title))
    }

    /// Load the note with the given title, or fail with `NoteNotFound`.
    pub fn resolve(&self, title: &str) -> Result<Note> {
        let path = self
            .locate(title)
            .ok_or_else(|| VaultzError::NoteNotFound(title.to_string()))?;
        self.load(&path)
    }

    /// Read and decode one note file (absolute path).
    pub fn load(&self, path: &Path) -> Result<Note> {
        let contents = fs::read_to_string(path)?;
        let rel = self.rel(path);
        let (body, metadata) =
            frontmatter::decode(&contents).map_err(|e| VaultzError::MalformedMetadata {
                path: rel.clone(),
                detail: e.to_string(),
            })?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Note {
            title,
            path: rel,
            body,
            metadata,
        })
    }

    /// Encode and write a note to its path, creating intermediate folders.
    pub fn write(&self, note: &Note) -> Result<()> {
        let abs = self.abs(&note.path);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = frontmatter::encode(&note.body, &note.metadata).map_err(|e| {
            VaultzError::MalformedMetadata {
                path: note.path.clone(),
                detail: e.to_string(),
            }
        })?;
        fs::write(abs, contents)?;
        Ok(())
    }

    /// Delete a note file by its vault-relative path.
    pub fn remove(&self, rel_path: &Path) -> Result<()> {
        fs::remove_file(self.abs(rel_path))?;
        Ok(())
    }

    /// Relocate a note file. Fails with `MoveConflict` if the destination
    /// already holds a file of the same name; never overwrites.
    pub fn relocate(&self, note: &NoteRef, destination_folder: &str) -> Result<NoteRef> {
        let src = self.abs(&note.path);
        let dest_dir = self.root.join(destination_folder);
        fs::create_dir_all(&dest_dir)?;

        let file_name = src
            .file_name()
            .ok_or_else(|| VaultzError::NoteNotFound(note.title.clone()))?;
        let dest = dest_dir.join(file_name);
        if dest.exists() {
            return Err(VaultzError::MoveConflict {
                title: note.title.clone(),
                destination: self.rel(&dest),
            });
        }
        fs::rename(&src, &dest)?;
        Ok(NoteRef {
            title: note.title.clone(),
            path: self.rel(&dest),
        })
    }

    /// Create a folder hierarchy under the root. Idempotent.
    pub fn create_folder(&self, rel_path: &str) -> Result<PathBuf> {
        let abs = self.root.join(rel_path);
        fs::create_dir_all(&abs)?;
        Ok(self.rel(&abs))
    }

    /// Every non-hidden directory under the root, with its direct note count.
    pub fn folders(&self) -> Vec<FolderInfo> {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(|entry| entry.ok())
            .filter(|e| e.depth() > 0 && e.file_type().is_dir())
            .map(|e| {
                let note_count = direct_note_count(e.path());
                FolderInfo {
                    path: self.rel(e.path()),
                    note_count,
                }
            })
            .collect()
    }

    pub fn abs(&self, rel_path: &Path) -> PathBuf {
        self.root.join(rel_path)
    }

    pub fn rel(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    /// The absolute path a new note with this title/folder would occupy.
    pub fn note_path(&self, title: &str, folder: Option<&str>) -> PathBuf {
        let dir = match folder {
            Some(f) => self.root.join(f),
            None => self.root.clone(),
        };
        dir.join(format!("{title}.{NOTE_EXT}"))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn has_note_ext(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == NOTE_EXT)
}

fn direct_note_count(dir: &Path) -> usize {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().map(|t| t.is_file()).unwrap_or(false) && has_note_ext(&e.path())
            })
            .count(),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to read folder while counting notes");
            0
        }
    }
}
