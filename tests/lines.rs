#![cfg(feature = "std")]

use std::fs;
use std::path::PathBuf;

use hbal_tree::lines::{Line, compare_lines, sort_files};
use hbal_tree::{LinesError, LoadedFile};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tempfile::TempDir;

/// Writes each `(name, contents)` pair into a fresh temporary directory.
fn write_inputs(files: &[(&str, &[u8])]) -> (TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().expect("create temp dir for line sorting");
    let paths = files
        .iter()
        .map(|(name, contents)| {
            let path = dir.path().join(name);
            fs::write(&path, contents).unwrap();
            path
        })
        .collect();
    (dir, paths)
}

#[test]
fn sort_files_concatenates_each_sorted_file() {
    let (_dir, paths) = write_inputs(&[("first", b"pear\napple\n"), ("second", b"zeta\n\0nul\nalpha")]);

    let mut out = Vec::new();
    sort_files(&paths, &mut out).unwrap();
    assert_eq!(out, b"apple\npear\n\0nul\nalphazeta\n".to_vec());
}

#[test]
fn sort_files_stops_at_first_missing_file() {
    let (dir, paths) = write_inputs(&[("good", b"b\na\n"), ("after", b"never\n")]);
    let missing = dir.path().join("missing");

    let mut out = Vec::new();
    let err = sort_files([&paths[0], &missing, &paths[1]], &mut out).unwrap_err();
    assert!(matches!(err, LinesError::Open { ref path, .. } if *path == missing));
    assert!(err.to_string().starts_with("failed to open"));
    assert_eq!(out, b"a\nb\n".to_vec());
}

#[test]
fn sort_files_with_no_paths_writes_nothing() {
    let mut out = Vec::new();
    sort_files(Vec::<PathBuf>::new(), &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn open_reads_binary_content() {
    let (_dir, paths) = write_inputs(&[("binary", b"\xff\xfe\n\x00\n")]);
    let mut loaded = LoadedFile::open(&paths[0]).unwrap();
    loaded.sort();
    let lines: Vec<&[u8]> = loaded.lines().iter().map(Line::as_bytes).collect();
    assert_eq!(lines, vec![&b"\x00\n"[..], b"\xff\xfe\n"]);
}

proptest! {
    /// Sorting permutes lines: the output has the same bytes, in order.
    #[test]
    fn sort_permutes_and_orders(input in proptest::collection::vec(any::<u8>(), 0..2_048)) {
        let mut file = LoadedFile::load(&input[..]).unwrap();
        let before = file.len();
        file.sort();
        prop_assert_eq!(file.len(), before);
        for pair in file.lines().windows(2) {
            prop_assert_ne!(compare_lines(&pair[0], &pair[1]), std::cmp::Ordering::Greater);
        }

        let mut out = Vec::new();
        file.write_to(&mut out).unwrap();
        let mut sorted_out = out.clone();
        let mut sorted_in = input.clone();
        sorted_out.sort_unstable();
        sorted_in.sort_unstable();
        prop_assert_eq!(sorted_out, sorted_in);
    }

    /// Every line but possibly the last ends in a newline.
    #[test]
    fn load_splits_after_every_newline(input in proptest::collection::vec(prop_oneof![Just(b'\n'), any::<u8>()], 0..512)) {
        let file = LoadedFile::load(&input[..]).unwrap();
        let newlines = input.iter().filter(|&&b| b == b'\n').count();
        let trailing = usize::from(input.last().is_some_and(|&b| b != b'\n'));
        prop_assert_eq!(file.len(), newlines + trailing);
        if let Some((_, rest)) = file.lines().split_last() {
            prop_assert!(rest.iter().all(Line::is_terminated));
        }
    }

    /// Agrees with the standard slice ordering on bytes.
    #[test]
    fn compare_lines_matches_slice_order(
        a in proptest::collection::vec(any::<u8>(), 0..16),
        b in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        prop_assert_eq!(compare_lines(&Line::from(a.clone()), &Line::from(b.clone())), a.cmp(&b));
    }
}
