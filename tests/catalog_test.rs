//! Tests for CSV loading and subset export using temp files

use std::fs;
use std::path::PathBuf;

use movietree::catalog::{export_subset, load_catalog, EXPORT_HEADER};
use movietree::util::testing;
use tempfile::tempdir;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const SAMPLE: &str = "\
movieId,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
6,Heat (1995),Action|Crime|Thriller
11,\"American President, The (1995)\",Comedy|Drama|Romance
";

fn write_sample(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    fs::write(&path, content).unwrap();
    (dir, path)
}

// ============================================================
// Loading Tests
// ============================================================

#[test]
fn given_well_formed_file_when_loading_then_all_rows_inserted() {
    let (_dir, path) = write_sample(SAMPLE);
    let report = load_catalog(&path, 1).unwrap();

    assert_eq!(report.loaded, 4);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.tree.len(), 4);

    let keys: Vec<&str> = report.tree.iter().map(|m| m.sort_key()).collect();
    assert_eq!(
        keys,
        [
            "American President, The (1995) - 11",
            "Heat (1995) - 6",
            "Jumanji (1995) - 2",
            "Toy Story (1995) - 1",
        ]
    );
}

#[test]
fn given_no_header_skip_when_loading_then_header_reported_as_malformed() {
    let (_dir, path) = write_sample(SAMPLE);
    let report = load_catalog(&path, 0).unwrap();

    // The header's "movieId" is not an integer identifier.
    assert_eq!(report.loaded, 4);
    assert_eq!(report.skipped, 1);
}

#[test]
fn given_malformed_rows_when_loading_then_reported_and_skipped() {
    let content = "\
movieId,title,genres
1,Toy Story (1995),Adventure
not-a-number,Broken Row (1999),Drama
2,Too Few Fields
3,Jumanji (1995),Adventure
";
    let (_dir, path) = write_sample(content);
    let report = load_catalog(&path, 1).unwrap();

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 2);
    let ids: Vec<u32> = report.tree.iter().map(|m| m.id()).collect();
    assert_eq!(ids, [3, 1]);
}

#[test]
fn given_duplicate_row_when_loading_then_reported_and_skipped() {
    let content = "\
movieId,title,genres
1,Toy Story (1995),Adventure
1,Toy Story (1995),Adventure
2,Jumanji (1995),Adventure
";
    let (_dir, path) = write_sample(content);
    let report = load_catalog(&path, 1).unwrap();

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.tree.len(), 2);
}

#[test]
fn given_missing_file_when_loading_then_io_error() {
    assert!(load_catalog("does/not/exist.csv", 1).is_err());
}

// ============================================================
// Export Tests
// ============================================================

#[test]
fn given_range_subset_when_exporting_then_header_and_rows_written() {
    let (_dir, path) = write_sample(SAMPLE);
    let report = load_catalog(&path, 1).unwrap();
    let subset = report.tree.range_subset("American", "Jumanji (1995) - 2");

    let out = _dir.path().join("subset.csv");
    export_subset(&out, &subset).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], EXPORT_HEADER);
    assert_eq!(lines.len(), 4);
    // Title containing a comma is quoted on the way out.
    assert_eq!(
        lines[1],
        "11,\"American President, The (1995) - 11\",Comedy|Drama|Romance"
    );
    assert_eq!(lines[2], "6,Heat (1995) - 6,Action|Crime|Thriller");
    assert_eq!(lines[3], "2,Jumanji (1995) - 2,Adventure|Children|Fantasy");
}

#[test]
fn given_empty_subset_when_exporting_then_header_only() {
    let (_dir, path) = write_sample(SAMPLE);
    let report = load_catalog(&path, 1).unwrap();
    let subset = report.tree.range_subset("Zz", "Zzz");

    let out = _dir.path().join("empty.csv");
    export_subset(&out, &subset).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.trim_end(), EXPORT_HEADER);
}
