//! The CLI prints exactly what the core display types render, so output
//! seen in a terminal matches what MCP clients receive.

use std::{path::Path, process::Command};

use campdir_core::{
    display::Terms,
    models::{Actor, CampQuery, NewCamp, Taxonomy},
    Directory, DirectoryBuilder,
};
use tempfile::TempDir;

async fn create_test_directory() -> (Directory, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let directory = DirectoryBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create directory");

    (directory, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &Path, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_campdir"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_search_output_matches_listing_display() {
    let (directory, _temp_dir) = create_test_directory().await;
    let db_path = directory.database_path().to_path_buf();

    let week = directory
        .create_term(Actor::Admin, Taxonomy::Week, "2 Weeks".to_string(), None, true)
        .await
        .expect("Failed to create term");
    for (name, state) in [("Camp Birchwood", "VT"), ("Camp Kettle Pond", "NH")] {
        let mut camp = NewCamp {
            approved: true,
            state: Some(state.to_string()),
            min_price: Some(500),
            max_price: Some(1200),
            ..NewCamp::named(name)
        };
        camp.terms.weeks = vec![week.id];
        directory
            .create_camp(Actor::Admin, camp)
            .await
            .expect("Failed to create camp");
    }

    let listing = directory
        .search_camps(CampQuery {
            state: Some("VT".to_string()),
            ..CampQuery::new()
        })
        .await
        .expect("Failed to search");

    let cli_output = run_cli_command(&db_path, &["camp", "search", "--state", "VT"]);
    assert_eq!(cli_output, listing.to_string());
    assert!(cli_output.contains("- **Duration**: 2 Weeks"));
    assert!(!cli_output.contains("Camp Kettle Pond"));
}

#[tokio::test]
async fn test_term_list_output_matches_terms_display() {
    let (directory, _temp_dir) = create_test_directory().await;
    let db_path = directory.database_path().to_path_buf();

    for name in ["Canoeing", "Archery", "Theater"] {
        directory
            .create_term(Actor::Admin, Taxonomy::Activity, name.to_string(), None, true)
            .await
            .expect("Failed to create term");
    }

    let terms = directory
        .list_terms(Taxonomy::Activity, false)
        .await
        .expect("Failed to list terms");
    let direct_output = Terms::new(Taxonomy::Activity, terms).to_string();

    let cli_output = run_cli_command(&db_path, &["term", "list", "activity"]);
    assert_eq!(cli_output, direct_output);
    assert!(cli_output.starts_with("## Activity terms"));
}
