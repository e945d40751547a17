use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vaultz::commands::select::SelectionCriteria;

#[derive(Parser, Debug)]
#[command(name = "vaultz")]
#[command(about = "Query and bulk-edit a markdown note vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root (defaults to $VAULTZ_VAULT, then the platform data dir)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Emit results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Selection criteria shared by the bulk subcommands. Explicit titles
/// override the other filters.
#[derive(Args, Debug)]
pub struct SelectionArgs {
    /// Select these notes by title (repeatable; overrides other filters)
    #[arg(long = "note")]
    pub notes: Vec<String>,

    /// Select notes carrying at least one of these tags (repeatable)
    #[arg(long = "with-tag")]
    pub with_tags: Vec<String>,

    /// Select notes under this folder
    #[arg(long)]
    pub folder: Option<String>,

    /// Select notes whose body contains this text
    #[arg(long)]
    pub matching: Option<String>,
}

impl SelectionArgs {
    pub fn to_criteria(&self) -> SelectionCriteria {
        SelectionCriteria {
            note_titles: self.notes.clone(),
            tags: self.with_tags.clone(),
            folder: self.folder.clone(),
            query: self.matching.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "n")]
    Create {
        title: String,

        /// Note content (empty note if omitted)
        #[arg(default_value = "")]
        content: String,

        /// Folder to place the note under (created if absent)
        #[arg(short, long)]
        folder: Option<String>,

        /// Initial tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Print a note
    #[command(alias = "v")]
    View { title: String },

    /// Replace or append to a note's content
    Update {
        title: String,
        content: String,

        /// Append instead of replacing
        #[arg(short, long)]
        append: bool,

        /// Create the note if it doesn't exist
        #[arg(long)]
        create_if_missing: bool,
    },

    /// Delete a note (no-op preview unless --yes)
    #[command(alias = "rm")]
    Delete {
        title: String,

        /// Actually delete; without this, reports what would be deleted
        #[arg(long)]
        yes: bool,
    },

    /// Get or create the daily note
    Daily {
        /// Date in YYYY-MM-DD form (today if omitted)
        date: Option<String>,

        /// Don't create the note if it's missing
        #[arg(long)]
        no_create: bool,
    },

    /// Add or remove tags on one note
    Tag {
        title: String,

        /// Tags to add (repeatable)
        #[arg(short, long)]
        add: Vec<String>,

        /// Tags to remove (repeatable)
        #[arg(short, long)]
        remove: Vec<String>,
    },

    /// Full-text search with snippets
    #[command(alias = "s")]
    Search {
        query: String,

        /// Only notes carrying at least one of these tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Only notes under this folder
        #[arg(short, long)]
        folder: Option<String>,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// List notes by tag and/or folder
    #[command(alias = "ls")]
    List {
        /// Only notes carrying at least one of these tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Only notes under this folder
        #[arg(short, long)]
        folder: Option<String>,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Find notes related by backlink or shared tags
    Related {
        title: String,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// List folders with their note counts
    Folders,

    /// Create a folder hierarchy
    Mkdir { path: String },

    /// Add/remove tags across a selection (preview unless --apply)
    BulkTag {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Tags to add (repeatable)
        #[arg(short, long)]
        add: Vec<String>,

        /// Tags to remove (repeatable)
        #[arg(short, long)]
        remove: Vec<String>,

        /// Commit the changes; without this, previews the selection
        #[arg(long)]
        apply: bool,
    },

    /// Move a selection to another folder (preview unless --apply)
    BulkMove {
        /// Destination folder
        destination: String,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Commit the changes; without this, previews the selection
        #[arg(long)]
        apply: bool,
    },

    /// Delete a selection (preview unless --apply --yes)
    BulkDelete {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Commit the changes; without this, previews the selection
        #[arg(long)]
        apply: bool,

        /// Required alongside --apply to actually delete
        #[arg(long)]
        yes: bool,
    },
}
