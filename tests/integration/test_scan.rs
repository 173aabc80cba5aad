//! Integration test for scanning a tree into CSV

use crate::fixtures::{create_simple_fixture, create_wide_fixture, display, read_rows, test_options};
use pathscan::services::sink::MemorySink;
use pathscan::{Coordinator, ScanOptions};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_simple_tree_rows_and_lengths() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_simple_fixture(temp_dir.path()).unwrap();
    let output = temp_dir.path().join("out.csv");

    let summary = pathscan::scan_to_csv(&root, &test_options(&output, 100)).unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.root, display(&root));
    assert_eq!(summary.output_path, output);
    assert!(summary.finished_at >= summary.started_at);
    assert_eq!(
        summary.elapsed(),
        summary.finished_at.duration_since(summary.started_at).unwrap()
    );

    let y = display(&root.join("b").join("y.txt"));
    let x = display(&root.join("x.txt"));
    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "file_path,path_length".to_string(),
            format!("{y},{}", y.len()),
            format!("{x},{}", x.len()),
        ]
    );
}

#[test]
fn test_row_count_matches_files_and_lengths_match_paths() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_wide_fixture(temp_dir.path(), 12, 9).unwrap();
    let output = temp_dir.path().join("out.csv");

    let summary = pathscan::scan_to_csv(&root, &test_options(&output, 10)).unwrap();
    let rows = read_rows(&output);

    assert_eq!(summary.processed, 108);
    assert_eq!(rows.len(), 108);
    for (path, length) in &rows {
        assert_eq!(path.len(), *length, "length mismatch for {path}");
        assert!(!path.ends_with("empty") && !path.ends_with("nested"));
    }
}

#[test]
fn test_output_independent_of_batch_size() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_wide_fixture(temp_dir.path(), 5, 7).unwrap();

    let mut outputs = Vec::new();
    for batch_size in [1, 3, 35, 100, 1_000] {
        let output = temp_dir.path().join(format!("out_{batch_size}.csv"));
        pathscan::scan_to_csv(&root, &test_options(&output, batch_size)).unwrap();
        outputs.push(fs::read(&output).unwrap());
    }

    for output in &outputs[1..] {
        assert_eq!(output, &outputs[0]);
    }
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_wide_fixture(temp_dir.path(), 4, 4).unwrap();
    let output = temp_dir.path().join("out.csv");
    let opts = test_options(&output, 5);

    pathscan::scan_to_csv(&root, &opts).unwrap();
    let first = fs::read(&output).unwrap();
    pathscan::scan_to_csv(&root, &opts).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unsorted_walk_finds_same_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_wide_fixture(temp_dir.path(), 6, 3).unwrap();
    let sorted_out = temp_dir.path().join("sorted.csv");
    let native_out = temp_dir.path().join("native.csv");

    pathscan::scan_to_csv(&root, &test_options(&sorted_out, 4)).unwrap();
    let native_opts = ScanOptions {
        sort_entries: false,
        ..test_options(&native_out, 4)
    };
    pathscan::scan_to_csv(&root, &native_opts).unwrap();

    let mut sorted = read_rows(&sorted_out);
    let mut native = read_rows(&native_out);
    sorted.sort();
    native.sort();
    assert_eq!(sorted, native);
}

#[test]
fn test_empty_directory_writes_header_only() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("empty");
    fs::create_dir_all(root.join("still/empty")).unwrap();
    let output = temp_dir.path().join("out.csv");

    let summary = pathscan::scan_to_csv(&root, &test_options(&output, 100)).unwrap();

    assert_eq!(summary.processed, 0);
    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().collect::<Vec<_>>(), vec!["file_path,path_length"]);
}

#[test]
fn test_existing_output_is_truncated() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_simple_fixture(temp_dir.path()).unwrap();
    let output = temp_dir.path().join("out.csv");
    fs::write(&output, "stale,999\n".repeat(50)).unwrap();

    pathscan::scan_to_csv(&root, &test_options(&output, 100)).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(!text.contains("stale"));
    assert_eq!(read_rows(&output).len(), 2);
}

#[test]
fn test_special_characters_are_quoted() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("quoted");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a,b.txt"), b"1").unwrap();
    fs::write(root.join("say \"hi\".txt"), b"2").unwrap();
    let output = temp_dir.path().join("out.csv");

    pathscan::scan_to_csv(&root, &test_options(&output, 1)).unwrap();

    let rows = read_rows(&output);
    let expected: Vec<(String, usize)> = ["a,b.txt", "say \"hi\".txt"]
        .iter()
        .map(|name| {
            let path = display(&root.join(name));
            let len = path.len();
            (path, len)
        })
        .collect();
    assert_eq!(rows, expected);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_listed_not_followed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("links");
    let target = temp_dir.path().join("target");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("inside.txt"), b"x").unwrap();
    std::os::unix::fs::symlink(&target, root.join("to_dir")).unwrap();
    std::os::unix::fs::symlink(&root, root.join("loop")).unwrap();
    let output = temp_dir.path().join("out.csv");

    pathscan::scan_to_csv(&root, &test_options(&output, 100)).unwrap();

    let paths: Vec<String> = read_rows(&output).into_iter().map(|(p, _)| p).collect();
    assert_eq!(
        paths,
        vec![display(&root.join("loop")), display(&root.join("to_dir"))]
    );
}

#[test]
fn test_tiny_queue_keeps_every_record_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_wide_fixture(temp_dir.path(), 10, 10).unwrap();
    let roomy_out = temp_dir.path().join("roomy.csv");
    let tight_out = temp_dir.path().join("tight.csv");

    pathscan::scan_to_csv(&root, &test_options(&roomy_out, 100)).unwrap();
    let tight = ScanOptions {
        channel_capacity: 1,
        ..test_options(&tight_out, 1)
    };
    pathscan::scan_to_csv(&root, &tight).unwrap();

    assert_eq!(fs::read(&roomy_out).unwrap(), fs::read(&tight_out).unwrap());
}

#[test]
fn test_memory_sink_receives_batches() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_wide_fixture(temp_dir.path(), 2, 5).unwrap();
    let output = temp_dir.path().join("unused.csv");

    let mut coordinator = Coordinator::new(test_options(&output, 4));
    let (total, sink) = coordinator.run_with_sink(&root, MemorySink::new()).unwrap();

    assert_eq!(total, 10);
    assert_eq!(sink.batch_sizes(), &[4, 4, 2]);
    assert!(sink.is_finished());
    assert!(!output.exists(), "sink runs must not create the CSV file");
}
