use std::fs;
use tempfile::TempDir;
use vaultz::api::VaultApi;
use vaultz::model::Connection;

fn seeded_vault(files: &[(&str, &str)]) -> (TempDir, VaultApi) {
    let dir = TempDir::new().unwrap();
    for (rel, contents) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    let api = VaultApi::open(dir.path());
    (dir, api)
}

#[test]
fn meeting_roadmap_scenario() {
    let (_dir, api) = seeded_vault(&[
        (
            "Meeting.md",
            "---\ntags:\n- work\n---\n\nDiscuss FastAPI roadmap",
        ),
        (
            "Roadmap.md",
            "---\ntags:\n- work\n---\n\nSee [[Meeting]] for notes",
        ),
    ]);

    let hits = api.search_notes("fastapi", &[], None, 10);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Meeting");
    assert!(hits[0].snippet.contains("FastAPI"));

    let related = api.find_related("Meeting", 10).unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].title, "Roadmap");
    // The shared `work` tag is present, but the backlink wins.
    assert_eq!(related[0].connection, Connection::Backlink);
    assert_eq!(related[0].shared_tags, vec!["work".to_string()]);
}

#[test]
fn search_returns_only_containing_notes_within_limit() {
    let (_dir, api) = seeded_vault(&[
        ("A.md", "alpha beta"),
        ("B.md", "BETA gamma"),
        ("C.md", "gamma delta"),
        ("D.md", "beta epsilon"),
    ]);

    let hits = api.search_notes("beta", &[], None, 2);
    assert_eq!(hits.len(), 2);
    // Traversal order, no ranking.
    assert_eq!(hits[0].title, "A");
    assert_eq!(hits[1].title, "B");
    for hit in &hits {
        let note = api.resolve_note(&hit.title).unwrap();
        assert!(note.body.to_lowercase().contains("beta"));
    }
}

#[test]
fn search_missing_folder_is_empty() {
    let (_dir, api) = seeded_vault(&[("A.md", "content here")]);
    assert!(api.search_notes("content", &[], Some("Archive"), 10).is_empty());
}

#[test]
fn list_respects_tag_filter_and_reports_created() {
    let (_dir, api) = seeded_vault(&[
        (
            "A.md",
            "---\ncreated: '2025-03-01T12:00:00+00:00'\ntags:\n- work\n---\n\na",
        ),
        ("B.md", "---\ntags:\n- home\n---\n\nb"),
    ]);

    let notes = api.list_notes(&["work".to_string()], None, 10);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "A");
    assert_eq!(notes[0].created, "2025-03-01T12:00:00+00:00");
}

#[test]
fn related_with_missing_source_is_not_found() {
    let (_dir, api) = seeded_vault(&[("A.md", "a")]);
    assert!(api.find_related("Ghost", 10).is_err());
}

#[test]
fn duplicate_titles_resolve_to_lexicographically_first_path() {
    let (_dir, api) = seeded_vault(&[
        ("Zeta/Dup.md", "zeta copy"),
        ("Alpha/Dup.md", "alpha copy"),
    ]);
    let note = api.resolve_note("Dup").unwrap();
    assert_eq!(note.body, "alpha copy");
}

#[test]
fn folders_listing_counts_direct_notes() {
    let (_dir, api) = seeded_vault(&[
        ("Projects/A.md", "a"),
        ("Projects/Sub/B.md", "b"),
        (".hidden/C.md", "c"),
    ]);

    let folders = api.list_folders();
    let names: Vec<String> = folders
        .iter()
        .map(|f| f.path.display().to_string())
        .collect();
    assert!(names.contains(&"Projects".to_string()));
    assert!(!names.iter().any(|n| n.contains(".hidden")));

    let projects = folders
        .iter()
        .find(|f| f.path.display().to_string() == "Projects")
        .unwrap();
    assert_eq!(projects.note_count, 1);
}
