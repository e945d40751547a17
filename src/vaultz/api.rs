//! # API Facade
//!
//! The single entry point for all vault operations. This layer is a thin
//! dispatch over the command modules: no business logic, no terminal I/O,
//! structured `Result` types only. UI clients (the bundled CLI, or any
//! external tool layer) should interact through this facade.

use crate::commands::bulk::BulkOutcome;
use crate::commands::delete::DeleteOutcome;
use crate::commands::select::SelectionCriteria;
use crate::commands::{bulk, create, daily, delete, list, related, search, select, tagging, update};
use crate::error::Result;
use crate::model::{FolderInfo, Note, NoteRef, NoteSummary, Relation, SearchHit};
use crate::vault::Vault;
use std::path::PathBuf;

pub struct VaultApi {
    vault: Vault,
}

impl VaultApi {
    pub fn new(vault: Vault) -> Self {
        Self { vault }
    }

    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::new(Vault::new(root))
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    // --- discovery & queries ---

    pub fn resolve_note(&self, title: &str) -> Result<Note> {
        self.vault.resolve(title)
    }

    pub fn search_notes(
        &self,
        query: &str,
        tags: &[String],
        folder: Option<&str>,
        limit: usize,
    ) -> Vec<SearchHit> {
        search::run(&self.vault, query, tags, folder, limit)
    }

    pub fn list_notes(
        &self,
        tags: &[String],
        folder: Option<&str>,
        limit: usize,
    ) -> Vec<NoteSummary> {
        list::run(&self.vault, tags, folder, limit)
    }

    pub fn find_related(&self, title: &str, limit: usize) -> Result<Vec<Relation>> {
        related::run(&self.vault, title, limit)
    }

    // --- selection & bulk mutation ---

    pub fn plan_selection(&self, criteria: &SelectionCriteria) -> Vec<NoteRef> {
        select::plan(&self.vault, criteria)
    }

    pub fn bulk_tag(
        &self,
        criteria: &SelectionCriteria,
        add: Vec<String>,
        remove: Vec<String>,
        dry_run: bool,
    ) -> Result<BulkOutcome> {
        bulk::bulk_tag(&self.vault, criteria, add, remove, dry_run)
    }

    pub fn bulk_move(
        &self,
        criteria: &SelectionCriteria,
        destination: String,
        dry_run: bool,
    ) -> Result<BulkOutcome> {
        bulk::bulk_move(&self.vault, criteria, destination, dry_run)
    }

    pub fn bulk_delete(
        &self,
        criteria: &SelectionCriteria,
        confirm: bool,
        dry_run: bool,
    ) -> Result<BulkOutcome> {
        bulk::bulk_delete(&self.vault, criteria, confirm, dry_run)
    }

    // --- single-note operations ---

    pub fn create_note(
        &self,
        title: &str,
        content: &str,
        folder: Option<&str>,
        tags: &[String],
    ) -> Result<NoteRef> {
        create::run(&self.vault, title, content, folder, tags)
    }

    pub fn update_note(
        &self,
        title: &str,
        content: &str,
        append: bool,
        create_if_missing: bool,
    ) -> Result<NoteRef> {
        update::run(&self.vault, title, content, append, create_if_missing)
    }

    pub fn delete_note(&self, title: &str, confirm: bool) -> Result<DeleteOutcome> {
        delete::run(&self.vault, title, confirm)
    }

    pub fn daily_note(&self, date: Option<&str>, create_if_missing: bool) -> Result<Note> {
        daily::run(&self.vault, date, create_if_missing)
    }

    pub fn manage_tags(
        &self,
        title: &str,
        add: &[String],
        remove: &[String],
    ) -> Result<Vec<String>> {
        tagging::run(&self.vault, title, add, remove)
    }

    // --- folders ---

    pub fn create_folder(&self, path: &str) -> Result<PathBuf> {
        self.vault.create_folder(path)
    }

    pub fn list_folders(&self) -> Vec<FolderInfo> {
        self.vault.folders()
    }
}
