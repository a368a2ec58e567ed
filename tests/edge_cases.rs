//! Edge case and error handling tests for treescribe


use harness::{TestProject, entries_from_tree_text, paths_from_tree_text, run_treescribe};
use serde_json::Value;
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::{PermissionsExt, symlink};

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[cfg(unix)]
#[test]
fn test_symlink_to_directory_not_descended() {
    let project = TestProject::new();
    project.add_file("realdir/file.rs", "fn file() {}");
    symlink(project.path().join("realdir"), project.path().join("linkdir"))
        .expect("Failed to create dir symlink");

    let (stdout, _stderr, success) = run_treescribe(project.path(), &[]);
    assert!(success, "treescribe should succeed with directory symlink");

    let paths = paths_from_tree_text(&stdout);
    assert!(paths.contains(&"linkdir".to_string()), "{:?}", paths);
    assert!(paths.contains(&"realdir/file.rs".to_string()));
    assert!(!paths.contains(&"linkdir/file.rs".to_string()), "links are not followed");
}

#[cfg(unix)]
#[test]
fn test_symlink_to_parent_no_infinite_loop() {
    let project = TestProject::new();
    project.add_file("subdir/file.rs", "fn file() {}");
    symlink("..", project.path().join("subdir").join("parent"))
        .expect("Failed to create parent symlink");

    let (stdout, _stderr, success) = run_treescribe(project.path(), &[]);
    assert!(success, "treescribe should not hang on parent symlink");

    let paths = paths_from_tree_text(&stdout);
    assert!(paths.contains(&"subdir/parent".to_string()));
    assert!(!paths.iter().any(|p| p.starts_with("subdir/parent/")));
}

#[cfg(unix)]
#[test]
fn test_broken_symlink() {
    let project = TestProject::new();
    project.add_file("real.txt", "content");
    symlink(project.path().join("missing.txt"), project.path().join("dangling.txt"))
        .expect("Failed to create broken symlink");

    let (stdout, stderr, success) = run_treescribe(project.path(), &[]);
    assert!(success, "broken symlinks should not fail the walk: {}", stderr);
    assert!(stdout.contains("dangling.txt"));

    let json: Value =
        serde_json::from_str(&project.read("project-structure.json")).expect("valid JSON");
    let dangling = json["structure"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["name"] == "dangling.txt")
        .expect("broken symlink listed");
    assert_eq!(dangling["type"], "file");
    assert!(dangling.get("size").is_none());
}

// ============================================================================
// Permission Edge Cases
// ============================================================================

#[cfg(unix)]
#[test]
fn test_unreadable_directory() {
    let project = TestProject::new();
    project.add_file("readable/file.txt", "ok");
    let locked = project.add_file("locked/secret.txt", "hidden");
    let locked_dir = locked.parent().unwrap().to_path_buf();

    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o000))
        .expect("Failed to set permissions");

    // Root ignores permission bits, so there is nothing to observe
    if fs::read_dir(&locked_dir).is_ok() {
        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let (stdout, _stderr, success) = run_treescribe(project.path(), &[]);

    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755))
        .expect("Failed to restore permissions");

    assert!(success, "an unreadable directory should not fail the run");
    assert!(stdout.contains("🔒 [Access Denied]"), "{}", stdout);
    assert!(stdout.contains("file.txt"));
    assert!(!stdout.contains("secret.txt"));
}

// ============================================================================
// Naming Edge Cases
// ============================================================================

#[test]
fn test_spaces_and_unicode_in_names() {
    let project = TestProject::new();
    project.add_file("my folder/some file.txt", "");
    project.add_file("données/résumé.md", "");
    project.add_file("日本語.txt", "");

    let (stdout, _stderr, success) = run_treescribe(project.path(), &[]);
    assert!(success);

    let paths = paths_from_tree_text(&stdout);
    assert!(paths.contains(&"my folder/some file.txt".to_string()), "{:?}", paths);
    assert!(paths.contains(&"données/résumé.md".to_string()));
    assert!(paths.contains(&"日本語.txt".to_string()));
}

#[test]
fn test_case_insensitive_sorting() {
    let project = TestProject::new();
    project.add_file("b.txt", "");
    project.add_file("B.md", "");
    project.add_file("a.txt", "");
    project.add_file("C.txt", "");

    let (stdout, _stderr, success) = run_treescribe(project.path(), &[]);
    assert!(success);
    assert_eq!(
        paths_from_tree_text(&stdout),
        vec!["a.txt", "B.md", "b.txt", "C.txt"]
    );
}

// ============================================================================
// Shape Edge Cases
// ============================================================================

#[test]
fn test_empty_directory() {
    let project = TestProject::new();

    let (stdout, _stderr, success) = run_treescribe(project.path(), &[]);
    assert!(success, "empty directory should work");
    assert!(stdout.contains("0 directories, 0 files"), "{}", stdout);

    let json: Value =
        serde_json::from_str(&project.read("project-structure.json")).expect("valid JSON");
    assert_eq!(json["structure"].as_array().unwrap().len(), 0);
    assert_eq!(json["statistics"]["deepestPath"], 0);
}

#[test]
fn test_deeply_nested() {
    let project = TestProject::new();
    let deep: Vec<String> = (0..30).map(|i| format!("level{}", i)).collect();
    let path = format!("{}/leaf.txt", deep.join("/"));
    project.add_file(&path, "");

    let (stdout, _stderr, success) = run_treescribe(project.path(), &[]);
    assert!(success, "deep nesting should work");

    let paths = paths_from_tree_text(&stdout);
    assert_eq!(paths.last(), Some(&path));
    assert!(stdout.contains("30 directories, 1 files"));
}

#[test]
fn test_many_files() {
    let project = TestProject::new();
    for i in 0..300 {
        project.add_file(&format!("files/file_{:03}.txt", i), "x");
    }

    let (stdout, _stderr, success) = run_treescribe(project.path(), &[]);
    assert!(success, "many files should work");
    assert!(stdout.contains("1 directories, 300 files"));

    let paths = paths_from_tree_text(&stdout);
    assert_eq!(paths[1], "files/file_000.txt");
    assert_eq!(paths[300], "files/file_299.txt");
}

#[test]
fn test_empty_subdirectory_is_listed() {
    let project = TestProject::new();
    project.add_dir("nothing_here");

    let (stdout, _stderr, success) = run_treescribe(project.path(), &[]);
    assert!(success);
    assert!(stdout.contains("└── 📁 nothing_here"));
    assert!(stdout.contains("1 directories, 0 files"));
    assert_eq!(
        entries_from_tree_text(&stdout),
        vec![("nothing_here".to_string(), "directory".to_string())]
    );
}

// ============================================================================
// Output Edge Cases
// ============================================================================

#[test]
fn test_aliases_write_one_file() {
    let project = TestProject::new();
    project.add_file("a.txt", "");
    let config = project.add_config("[output]\nformats = [\"md\", \"MARKDOWN\", \" tree \"]\n");

    let (stdout, stderr, success) =
        run_treescribe(project.path(), &["--config", config.to_str().unwrap()]);
    assert!(success, "{}", stderr);
    assert!(project.exists("project-structure.md"));
    assert_eq!(stdout.matches("project-structure.md").count(), 1, "{}", stdout);
}

#[test]
fn test_consolidated_cleans_control_characters() {
    let project = TestProject::new();
    project.add_bytes("weird.txt", b"before\0after\x07bell\n");
    let config = project.add_config("[output]\nformats = [\"consolidated\"]\n");

    let (_stdout, stderr, success) =
        run_treescribe(project.path(), &["--config", config.to_str().unwrap()]);
    assert!(success, "{}", stderr);

    let text = project.read("project-structure.consolidated.md");
    assert!(text.contains("before after bell"), "{}", text);
    assert!(!text.contains('\0'));
}

#[test]
fn test_consolidated_skips_large_files() {
    let project = TestProject::new();
    project.add_file("small.txt", "tiny");
    project.add_bytes("huge.txt", &vec![b'x'; 1024 * 1024 + 1]);
    let config = project.add_config("[output]\nformats = [\"consolidated\"]\n");

    let (_stdout, stderr, success) =
        run_treescribe(project.path(), &["--config", config.to_str().unwrap()]);
    assert!(success, "{}", stderr);

    let text = project.read("project-structure.consolidated.md");
    assert!(text.contains("small.txt"));
    assert!(!text.contains("## huge.txt"), "large files are not inlined");
}

#[test]
fn test_unwritable_output_reports_failure() {
    let project = TestProject::new();
    project.add_file("a.txt", "");
    // A directory where the .md file should go makes that single write fail
    project.add_dir("blocked/listing.md");

    let (stdout, stderr, success) = run_treescribe(project.path(), &[".", "blocked/listing"]);
    assert!(!success);
    assert!(stderr.contains("listing.md"), "{}", stderr);
    assert!(project.exists("blocked/listing.json"));
    assert!(stdout.contains("listing.json"));
}
