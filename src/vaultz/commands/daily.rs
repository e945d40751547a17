use crate::commands::create;
use crate::error::{Result, VaultzError};
use crate::model::Note;
use crate::vault::Vault;
use chrono::NaiveDate;
use tracing::info;

/// Get or materialize the daily note for a date (`YYYY-MM-DD`, default
/// today). New daily notes start from a fixed template with the
/// `daily-note` tag.
pub fn run(vault: &Vault, date: Option<&str>, create_if_missing: bool) -> Result<Note> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| VaultzError::InvalidDate(raw.to_string()))?,
        None => chrono::Utc::now().date_naive(),
    };
    let title = date.format("%Y-%m-%d").to_string();

    match vault.resolve(&title) {
        Ok(note) => Ok(note),
        Err(VaultzError::NoteNotFound(_)) if create_if_missing => {
            let body = format!(
                "# Daily Note - {}\n\n## Tasks\n\n## Notes\n\n",
                date.format("%B %d, %Y")
            );
            create::run(vault, &title, &body, None, &["daily-note".to_string()])?;
            info!(title, "daily note created");
            vault.resolve(&title)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_from_template_when_missing() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        let note = run(&vault, Some("2025-01-15"), true).unwrap();
        assert_eq!(note.title, "2025-01-15");
        assert!(note.body.starts_with("# Daily Note - January 15, 2025"));
        assert_eq!(note.tags(), vec!["daily-note".to_string()]);
    }

    #[test]
    fn returns_existing_note_unchanged() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("2025-01-15.md"), "my own notes").unwrap();
        let vault = Vault::new(dir.path());
        let note = run(&vault, Some("2025-01-15"), true).unwrap();
        assert_eq!(note.body, "my own notes");
    }

    #[test]
    fn missing_without_create_is_not_found() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        assert!(matches!(
            run(&vault, Some("2025-01-15"), false),
            Err(VaultzError::NoteNotFound(_))
        ));
    }

    #[test]
    fn rejects_bad_date_format() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path());
        assert!(matches!(
            run(&vault, Some("15/01/2025"), true),
            Err(VaultzError::InvalidDate(_))
        ));
    }
}
