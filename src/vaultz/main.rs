use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vaultz::api::VaultApi;
use vaultz::commands::bulk::BulkOutcome;
use vaultz::error::{Result, VaultzError};
use vaultz::model::{FolderInfo, NoteSummary, Relation, SearchHit};

mod args;
use args::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: VaultApi,
    json: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = resolve_vault_root(cli.vault.clone());
    let ctx = AppContext {
        api: VaultApi::open(root),
        json: cli.json,
    };

    match cli.command {
        Commands::Create {
            title,
            content,
            folder,
            tags,
        } => handle_create(&ctx, &title, &content, folder.as_deref(), &tags),
        Commands::View { title } => handle_view(&ctx, &title),
        Commands::Update {
            title,
            content,
            append,
            create_if_missing,
        } => handle_update(&ctx, &title, &content, append, create_if_missing),
        Commands::Delete { title, yes } => handle_delete(&ctx, &title, yes),
        Commands::Daily { date, no_create } => handle_daily(&ctx, date.as_deref(), !no_create),
        Commands::Tag { title, add, remove } => handle_tag(&ctx, &title, &add, &remove),
        Commands::Search {
            query,
            tags,
            folder,
            limit,
        } => handle_search(&ctx, &query, &tags, folder.as_deref(), limit),
        Commands::List {
            tags,
            folder,
            limit,
        } => handle_list(&ctx, &tags, folder.as_deref(), limit),
        Commands::Related { title, limit } => handle_related(&ctx, &title, limit),
        Commands::Folders => handle_folders(&ctx),
        Commands::Mkdir { path } => handle_mkdir(&ctx, &path),
        Commands::BulkTag {
            selection,
            add,
            remove,
            apply,
        } => {
            let outcome = ctx
                .api
                .bulk_tag(&selection.to_criteria(), add, remove, !apply)?;
            print_outcome(&ctx, &outcome, "tag")
        }
        Commands::BulkMove {
            destination,
            selection,
            apply,
        } => {
            let outcome = ctx
                .api
                .bulk_move(&selection.to_criteria(), destination, !apply)?;
            print_outcome(&ctx, &outcome, "move")
        }
        Commands::BulkDelete {
            selection,
            apply,
            yes,
        } => {
            let outcome = ctx
                .api
                .bulk_delete(&selection.to_criteria(), yes, !apply)?;
            print_outcome(&ctx, &outcome, "delete")
        }
    }
}

fn resolve_vault_root(flag: Option<PathBuf>) -> PathBuf {
    if let Some(root) = flag {
        return root;
    }
    if let Ok(env_root) = std::env::var("VAULTZ_VAULT") {
        if !env_root.is_empty() {
            return PathBuf::from(env_root);
        }
    }
    let proj_dirs =
        ProjectDirs::from("dev", "vaultz", "vaultz").expect("Could not determine data dir");
    proj_dirs.data_dir().join("vault")
}

fn handle_create(
    ctx: &AppContext,
    title: &str,
    content: &str,
    folder: Option<&str>,
    tags: &[String],
) -> Result<()> {
    let created = ctx.api.create_note(title, content, folder, tags)?;
    if ctx.json {
        return print_json(&created);
    }
    println!(
        "Created '{}' at {}",
        created.title.bold(),
        created.path.display()
    );
    Ok(())
}

fn handle_view(ctx: &AppContext, title: &str) -> Result<()> {
    let note = ctx.api.resolve_note(title)?;
    if ctx.json {
        return print_json(&note);
    }
    println!("{}  {}", note.title.bold(), note.path.display().to_string().dimmed());
    let tags = note.tags();
    if !tags.is_empty() {
        println!("{}", format!("[{}]", tags.join(", ")).cyan());
    }
    println!();
    println!("{}", note.body);
    Ok(())
}

fn handle_update(
    ctx: &AppContext,
    title: &str,
    content: &str,
    append: bool,
    create_if_missing: bool,
) -> Result<()> {
    let updated = ctx.api.update_note(title, content, append, create_if_missing)?;
    if ctx.json {
        return print_json(&updated);
    }
    println!(
        "{} '{}'",
        if append { "Appended to" } else { "Updated" },
        updated.title.bold()
    );
    Ok(())
}

fn handle_delete(ctx: &AppContext, title: &str, yes: bool) -> Result<()> {
    let outcome = ctx.api.delete_note(title, yes)?;
    if ctx.json {
        return print_json(&outcome);
    }
    if outcome.deleted {
        println!("Deleted '{}'", outcome.note.title.bold());
    } else {
        println!(
            "Would delete '{}' ({}). Re-run with {} to delete.",
            outcome.note.title.bold(),
            outcome.note.path.display(),
            "--yes".yellow()
        );
    }
    Ok(())
}

fn handle_daily(ctx: &AppContext, date: Option<&str>, create_if_missing: bool) -> Result<()> {
    let note = ctx.api.daily_note(date, create_if_missing)?;
    if ctx.json {
        return print_json(&note);
    }
    println!("{}", note.title.bold());
    println!();
    println!("{}", note.body);
    Ok(())
}

fn handle_tag(ctx: &AppContext, title: &str, add: &[String], remove: &[String]) -> Result<()> {
    let tags = ctx.api.manage_tags(title, add, remove)?;
    if ctx.json {
        return print_json(&tags);
    }
    println!(
        "Tags for '{}': {}",
        title.bold(),
        format!("[{}]", tags.join(", ")).cyan()
    );
    Ok(())
}

fn handle_search(
    ctx: &AppContext,
    query: &str,
    tags: &[String],
    folder: Option<&str>,
    limit: usize,
) -> Result<()> {
    if query.chars().count() < 3 {
        return Err(VaultzError::InvalidCriteria(
            "search query must be at least 3 characters".to_string(),
        ));
    }
    let hits = ctx.api.search_notes(query, tags, folder, limit);
    if ctx.json {
        return print_json(&hits);
    }
    print_hits(&hits);
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    tags: &[String],
    folder: Option<&str>,
    limit: usize,
) -> Result<()> {
    let notes = ctx.api.list_notes(tags, folder, limit);
    if ctx.json {
        return print_json(&notes);
    }
    print_summaries(&notes);
    Ok(())
}

fn handle_related(ctx: &AppContext, title: &str, limit: usize) -> Result<()> {
    match ctx.api.find_related(title, limit) {
        Ok(relations) => {
            if ctx.json {
                return print_json(&relations);
            }
            print_relations(&relations);
            Ok(())
        }
        // Absence means "nothing related", not a hard failure.
        Err(VaultzError::NoteNotFound(_)) => {
            if ctx.json {
                return print_json::<[Relation; 0]>(&[]);
            }
            println!("No note titled '{}' in the vault.", title);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn handle_folders(ctx: &AppContext) -> Result<()> {
    let folders = ctx.api.list_folders();
    if ctx.json {
        return print_json(&folders);
    }
    print_folders(&folders);
    Ok(())
}

fn handle_mkdir(ctx: &AppContext, path: &str) -> Result<()> {
    let created = ctx.api.create_folder(path)?;
    if ctx.json {
        return print_json(&created);
    }
    println!("Created folder {}", created.display());
    Ok(())
}

// --- rendering ---

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No matches.");
        return;
    }
    for hit in hits {
        println!(
            "{}  {}",
            hit.title.bold(),
            hit.path.display().to_string().dimmed()
        );
        let one_line = hit.snippet.replace(['\n', '\r'], " ");
        println!("  {}", truncate_display(one_line.trim(), 96));
    }
}

fn print_summaries(notes: &[NoteSummary]) {
    if notes.is_empty() {
        println!("No notes.");
        return;
    }
    for note in notes {
        let mut line = format!(
            "{}  {}",
            note.title.bold(),
            note.path.display().to_string().dimmed()
        );
        if !note.tags.is_empty() {
            line = format!("{line}  {}", format!("[{}]", note.tags.join(", ")).cyan());
        }
        if let Some(age) = relative_time(&note.created) {
            line = format!("{line}  {}", age.italic().dimmed());
        }
        println!("{line}");
    }
}

fn print_relations(relations: &[Relation]) {
    if relations.is_empty() {
        println!("No related notes.");
        return;
    }
    for rel in relations {
        let label = match rel.connection {
            vaultz::model::Connection::Backlink => "backlink".green(),
            vaultz::model::Connection::SharedTags => "shared tags".yellow(),
        };
        let mut line = format!(
            "{}  {}  {}",
            rel.title.bold(),
            rel.path.display().to_string().dimmed(),
            label
        );
        if !rel.shared_tags.is_empty() {
            line = format!(
                "{line} {}",
                format!("[{}]", rel.shared_tags.join(", ")).cyan()
            );
        }
        println!("{line}");
    }
}

fn print_folders(folders: &[FolderInfo]) {
    if folders.is_empty() {
        println!("No folders.");
        return;
    }
    for folder in folders {
        println!(
            "{}  {}",
            folder.path.display(),
            format!(
                "{} note{}",
                folder.note_count,
                if folder.note_count == 1 { "" } else { "s" }
            )
            .dimmed()
        );
    }
}

fn print_outcome(ctx: &AppContext, outcome: &BulkOutcome, verb: &str) -> Result<()> {
    if ctx.json {
        return print_json(outcome);
    }
    if outcome.dry_run {
        println!(
            "Would {} {} note{}:",
            verb,
            outcome.selected,
            if outcome.selected == 1 { "" } else { "s" }
        );
        for item in &outcome.affected {
            println!(
                "  {}  {}",
                item.title.bold(),
                item.path.display().to_string().dimmed()
            );
        }
        println!("Re-run with {} to commit.", "--apply".yellow());
    } else {
        println!(
            "Applied {} to {} of {} selected note{}.",
            verb,
            outcome.applied,
            outcome.selected,
            if outcome.selected == 1 { "" } else { "s" }
        );
        for failure in &outcome.failures {
            println!(
                "  {} {}  {}",
                "skipped".red(),
                failure.title.bold(),
                failure.reason
            );
        }
    }
    Ok(())
}

fn relative_time(created: &str) -> Option<String> {
    let parsed = chrono::DateTime::parse_from_rfc3339(created).ok()?;
    let age = chrono::Utc::now()
        .signed_duration_since(parsed.with_timezone(&chrono::Utc))
        .to_std()
        .ok()?;
    Some(timeago::Formatter::new().convert(age))
}

fn truncate_display(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + char_width > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        width += char_width;
    }
    out.push('…');
    out
}
