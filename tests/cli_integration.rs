//! CLI integration tests for circ
//!
//! These tests drive the binary end-to-end: every invocation is a fresh
//! process, so anything that must survive between commands exercises the
//! persistence boundary for real.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance for the circ binary pointed at a data dir
fn circ_cmd(data_dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("circ"));
    cmd.env("CIRC_DATA_DIR", data_dir);
    cmd
}

/// Adds a book and returns its ID
fn add_book(dir: &Path, title: &str, author: &str) -> String {
    let output = circ_cmd(dir)
        .args(["book", "add", title, author, "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

/// Registers a member and returns their ID
fn add_member(dir: &Path, first: &str, last: &str) -> String {
    let output = circ_cmd(dir)
        .args(["member", "add", first, last, "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Catalog Tests
// =============================================================================

#[test]
fn test_book_add_reports_success() {
    let dir = TempDir::new().unwrap();

    circ_cmd(dir.path())
        .args(["book", "add", "Dune", "Herbert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book added successfully!"));
}

#[test]
fn test_book_add_persists_across_invocations() {
    let dir = TempDir::new().unwrap();
    add_book(dir.path(), "Dune", "Herbert");

    circ_cmd(dir.path())
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"));
}

#[test]
fn test_duplicate_title_is_rejected() {
    let dir = TempDir::new().unwrap();
    add_book(dir.path(), "Dune", "Herbert");

    circ_cmd(dir.path())
        .args(["book", "add", "dune", "Someone Else"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // The catalog still holds exactly one book
    let output = circ_cmd(dir.path())
        .args(["book", "list", "--format", "json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let books: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(books.as_array().unwrap().len(), 1);
}

#[test]
fn test_blank_title_is_rejected() {
    let dir = TempDir::new().unwrap();

    circ_cmd(dir.path())
        .args(["book", "add", "   ", "Herbert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title and author are required"));
}

#[test]
fn test_book_list_search_filters_by_title() {
    let dir = TempDir::new().unwrap();
    add_book(dir.path(), "Dune", "Herbert");
    add_book(dir.path(), "Emma", "Austen");

    circ_cmd(dir.path())
        .args(["book", "list", "--search", "dun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").and(predicate::str::contains("Emma").not()));
}

// =============================================================================
// Member Tests
// =============================================================================

#[test]
fn test_member_add_and_list() {
    let dir = TempDir::new().unwrap();
    add_member(dir.path(), "Jane", "Doe");

    circ_cmd(dir.path())
        .args(["member", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe"));
}

#[test]
fn test_blank_member_name_is_rejected() {
    let dir = TempDir::new().unwrap();

    circ_cmd(dir.path())
        .args(["member", "add", "Jane", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("First and last name are required"));
}

// =============================================================================
// Circulation Tests
// =============================================================================

#[test]
fn test_lend_and_return_flow() {
    let dir = TempDir::new().unwrap();
    let book = add_book(dir.path(), "Dune", "Herbert");
    let member = add_member(dir.path(), "Jane", "Doe");

    circ_cmd(dir.path())
        .args(["book", "lend", &book, &member])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book lent successfully!"));

    circ_cmd(dir.path())
        .args(["loans", &member])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"));

    circ_cmd(dir.path())
        .args(["book", "return", &book])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book returned successfully!"));

    circ_cmd(dir.path())
        .args(["loans", &member])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active loans"));
}

#[test]
fn test_lend_to_current_borrower_is_refused() {
    let dir = TempDir::new().unwrap();
    let book = add_book(dir.path(), "Dune", "Herbert");
    let member = add_member(dir.path(), "Jane", "Doe");

    circ_cmd(dir.path())
        .args(["book", "lend", &book, &member])
        .assert()
        .success();

    circ_cmd(dir.path())
        .args(["book", "lend", &book, &member])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already borrowing"));
}

#[test]
fn test_lend_of_loaned_book_joins_waitlist_and_return_promotes() {
    let dir = TempDir::new().unwrap();
    let book = add_book(dir.path(), "Dune", "Herbert");
    let jane = add_member(dir.path(), "Jane", "Doe");
    let john = add_member(dir.path(), "John", "Smith");

    circ_cmd(dir.path())
        .args(["book", "lend", &book, &jane])
        .assert()
        .success();

    // Lending an on-loan book queues the member instead
    circ_cmd(dir.path())
        .args(["book", "lend", &book, &john])
        .assert()
        .success()
        .stdout(predicate::str::contains("added to its waitlist"));

    // Queueing the same member twice is refused
    circ_cmd(dir.path())
        .args(["book", "lend", &book, &john])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already on the waitlist"));

    // Returning promotes the waitlist head in the same step
    circ_cmd(dir.path())
        .args(["book", "return", &book])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Book returned and automatically lent to John Smith!",
        ));

    circ_cmd(dir.path())
        .args(["loans", &john])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"));
}

#[test]
fn test_lend_to_unknown_member_is_refused() {
    let dir = TempDir::new().unwrap();
    let book = add_book(dir.path(), "Dune", "Herbert");

    circ_cmd(dir.path())
        .args(["book", "lend", &book, "m-0000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("member m-0000000 not found"));
}

#[test]
fn test_return_of_unknown_book_is_refused() {
    let dir = TempDir::new().unwrap();

    circ_cmd(dir.path())
        .args(["book", "return", "b-0000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("book b-0000000 not found"));
}

#[test]
fn test_return_of_shelved_book_is_refused() {
    let dir = TempDir::new().unwrap();
    let book = add_book(dir.path(), "Dune", "Herbert");

    circ_cmd(dir.path())
        .args(["book", "return", &book])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not currently on loan"));
}

// =============================================================================
// Report Tests
// =============================================================================

#[test]
fn test_popular_report_ranks_by_checkouts() {
    let dir = TempDir::new().unwrap();
    let dune = add_book(dir.path(), "Dune", "Herbert");
    add_book(dir.path(), "Emma", "Austen");
    let member = add_member(dir.path(), "Jane", "Doe");

    circ_cmd(dir.path())
        .args(["book", "lend", &dune, &member])
        .assert()
        .success();

    circ_cmd(dir.path())
        .args(["report", "popular"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Dune")
                .and(predicate::str::contains("1 checkouts"))
                .and(predicate::str::contains("Emma").not()),
        );
}

#[test]
fn test_overdue_report_is_clean_for_fresh_loans() {
    let dir = TempDir::new().unwrap();
    let book = add_book(dir.path(), "Dune", "Herbert");
    let member = add_member(dir.path(), "Jane", "Doe");

    circ_cmd(dir.path())
        .args(["book", "lend", &book, &member])
        .assert()
        .success();

    circ_cmd(dir.path())
        .args(["report", "overdue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No overdue books"));
}

#[test]
fn test_status_shows_totals() {
    let dir = TempDir::new().unwrap();
    let book = add_book(dir.path(), "Dune", "Herbert");
    add_book(dir.path(), "Emma", "Austen");
    let member = add_member(dir.path(), "Jane", "Doe");

    circ_cmd(dir.path())
        .args(["book", "lend", &book, &member])
        .assert()
        .success();

    let output = circ_cmd(dir.path())
        .args(["status", "--format", "json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(summary["totalBooks"], 2);
    assert_eq!(summary["booksCheckedOut"], 1);
    assert_eq!(summary["currentlyOnLoan"], 1);
    assert_eq!(summary["overdue"], 0);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_snapshot_lands_in_the_data_dir() {
    let dir = TempDir::new().unwrap();
    add_book(dir.path(), "Dune", "Herbert");

    let data_file = dir.path().join("library-lite-data.json");
    assert!(data_file.is_file());

    let raw = fs::read_to_string(&data_file).unwrap();
    assert!(raw.contains("\"Dune\""));
    assert!(raw.contains("\"checkoutCount\":0"));
}

#[test]
fn test_malformed_snapshot_falls_back_to_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("library-lite-data.json"), "not json {").unwrap();

    circ_cmd(dir.path())
        .args(["book", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found"));
}

#[test]
fn test_loan_dates_survive_a_reload() {
    let dir = TempDir::new().unwrap();
    let book = add_book(dir.path(), "Dune", "Herbert");
    let member = add_member(dir.path(), "Jane", "Doe");

    circ_cmd(dir.path())
        .args(["book", "lend", &book, &member])
        .assert()
        .success();

    let raw = fs::read_to_string(dir.path().join("library-lite-data.json")).unwrap();
    let before: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let loan_date = before["loans"][0]["loanDate"].as_str().unwrap().to_string();
    let due_date = before["loans"][0]["dueDate"].as_str().unwrap().to_string();

    // Any later command rewrites the snapshot from the reloaded state
    let other = add_book(dir.path(), "Emma", "Austen");
    circ_cmd(dir.path())
        .args(["book", "lend", &other, &member])
        .assert()
        .success();

    let raw = fs::read_to_string(dir.path().join("library-lite-data.json")).unwrap();
    let after: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(after["loans"][0]["loanDate"].as_str().unwrap(), loan_date);
    assert_eq!(after["loans"][0]["dueDate"].as_str().unwrap(), due_date);
}
