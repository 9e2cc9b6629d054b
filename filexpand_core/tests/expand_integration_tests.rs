//! Integration tests for path expansion against real directory trees

use filexpand_core::{ConfigLoader, ExpandOptions, PathExpander, expand, expand_all};
use filexpand_test_utils::TestTree;
use serial_test::serial;
use std::path::PathBuf;

fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}

#[test]
fn test_existing_file_expands_to_exactly_itself() {
    init_logging();
    let tree = TestTree::builder()
        .files(&["model.csv", "other.csv"])
        .build()
        .unwrap();
    let spec = tree.spec("model.csv");

    assert_eq!(expand(&spec), vec![PathBuf::from(&spec)]);
}

#[test]
fn test_directory_expansion_at_various_depths() {
    init_logging();
    for depth in [0, 1, 3] {
        let tree = TestTree::builder().nested_files(depth, 4).build().unwrap();

        let files = expand(&tree.root_spec());

        assert_eq!(
            sorted(files),
            tree.sorted_files(),
            "depth {depth} expanded to the wrong set"
        );
    }
}

#[test]
fn test_directory_expansion_mixed_tree() {
    init_logging();
    let tree = TestTree::builder()
        .files(&[
            "part-0.csv",
            "a/part-1.csv",
            "a/b/part-2.csv",
            "a/b/c/part-3.csv",
            "z/part-4.csv",
        ])
        .build()
        .unwrap();

    let files = expand(&tree.root_spec());

    assert_eq!(files.len(), 5);
    assert_eq!(sorted(files), tree.sorted_files());
}

#[test]
fn test_directories_without_files_expand_to_nothing() {
    init_logging();
    let tree = TestTree::builder()
        .dir("empty")
        .dir("only_dirs/x/y")
        .dir("only_dirs/z")
        .build()
        .unwrap();

    assert!(expand(&tree.spec("empty")).is_empty());
    assert!(expand(&tree.spec("only_dirs")).is_empty());
    assert!(expand(&tree.root_spec()).is_empty());
}

#[test]
fn test_trailing_separator_on_directory() {
    init_logging();
    let tree = TestTree::builder().files(&["d/one", "d/two"]).build().unwrap();

    let with_sep = format!("{}/", tree.spec("d"));

    assert_eq!(
        sorted(expand(&with_sep)),
        vec![tree.path("d/one"), tree.path("d/two")]
    );
}

#[test]
fn test_pattern_matching_nothing_is_empty() {
    init_logging();
    let tree = TestTree::builder().file("data.csv").build().unwrap();

    assert!(expand(&format!("{}/*.parquet", tree.root_spec())).is_empty());
    assert!(expand(&tree.spec("missing.csv")).is_empty());
    assert!(expand(&format!("{}/no_such_dir/*", tree.root_spec())).is_empty());
}

#[test]
fn test_pattern_matches_exact_set() {
    init_logging();
    let tree = TestTree::builder()
        .files(&[
            "shard-1.csv",
            "shard-2.csv",
            "shard-3.csv",
            "shard-1.txt",
            "nested/shard-4.csv",
        ])
        .build()
        .unwrap();

    let files = expand(&format!("{}/shard-?.csv", tree.root_spec()));

    assert_eq!(
        sorted(files),
        vec![
            tree.path("shard-1.csv"),
            tree.path("shard-2.csv"),
            tree.path("shard-3.csv"),
        ]
    );
}

#[test]
fn test_pattern_across_directories() {
    init_logging();
    let tree = TestTree::builder()
        .files(&["day1/log.txt", "day2/log.txt", "day2/skip.bin", "log.txt"])
        .build()
        .unwrap();

    let files = expand(&format!("{}/day[0-9]/*.txt", tree.root_spec()));

    assert_eq!(
        sorted(files),
        vec![tree.path("day1/log.txt"), tree.path("day2/log.txt")]
    );
}

#[test]
fn test_batch_is_concatenation_with_duplicates() {
    init_logging();
    let tree = TestTree::builder()
        .files(&["a/1.txt", "a/2.txt", "b/3.txt"])
        .build()
        .unwrap();
    let a = tree.spec("a");
    let overlap = tree.spec("a/1.txt");
    let b = format!("{}/b/*.txt", tree.root_spec());

    let batch = expand_all([&a, &overlap, &b]);

    let mut expected = expand(&a);
    expected.extend(expand(&overlap));
    expected.extend(expand(&b));
    assert_eq!(batch, expected);
    assert_eq!(batch.len(), 4);
    assert_eq!(
        batch.iter().filter(|p| **p == tree.path("a/1.txt")).count(),
        2
    );
}

#[test]
fn test_batch_of_nothing() {
    assert!(expand_all(Vec::<String>::new()).is_empty());
}

#[test]
fn test_hidden_entries_excluded_from_directory_expansion() {
    init_logging();
    let tree = TestTree::builder()
        .files(&[
            "visible.txt",
            ".hidden.txt",
            ".git/config",
            "sub/.secret",
            "sub/shown.txt",
        ])
        .build()
        .unwrap();

    let files = expand(&tree.root_spec());

    assert_eq!(
        sorted(files),
        vec![tree.path("sub/shown.txt"), tree.path("visible.txt")]
    );
}

#[test]
fn test_hidden_file_named_explicitly_is_kept() {
    init_logging();
    let tree = TestTree::builder().file(".env").build().unwrap();
    let spec = tree.spec(".env");

    assert_eq!(expand(&spec), vec![PathBuf::from(&spec)]);
}

#[test]
fn test_expansion_is_idempotent() {
    init_logging();
    let tree = TestTree::builder()
        .files(&["x/1", "x/y/2", "z/3", "4"])
        .build()
        .unwrap();
    let specs = [tree.root_spec(), format!("{}/*/*", tree.root_spec())];

    let first = expand_all(&specs);
    let second = expand_all(&specs);

    assert_eq!(first, second);
}

#[test]
fn test_max_depth_limits_directory_expansion() {
    init_logging();
    let tree = TestTree::builder()
        .files(&["top.txt", "a/mid.txt", "a/b/deep.txt"])
        .build()
        .unwrap();
    let expander = PathExpander::new(ExpandOptions::new().with_max_depth(Some(2)));

    let files = expander.expand(&tree.root_spec());

    assert_eq!(
        sorted(files),
        vec![tree.path("a/mid.txt"), tree.path("top.txt")]
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_followed() {
    init_logging();
    let tree = TestTree::builder()
        .file("real/data.csv")
        .dir("view")
        .symlink("real", "view/link")
        .build()
        .unwrap();

    assert_eq!(expand(&tree.spec("view")), vec![tree.path("view/link/data.csv")]);
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_terminates() {
    init_logging();
    let tree = TestTree::builder()
        .file("sub/file.txt")
        .symlink("", "sub/back")
        .build()
        .unwrap();

    let files = expand(&tree.root_spec());

    assert_eq!(files, vec![tree.path("sub/file.txt")]);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_names_in_directory_and_pattern() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    init_logging();
    let tree = TestTree::builder()
        .files(&["good.txt", ".hidden.txt"])
        .build()
        .unwrap();
    let bad_file = tree.root().join(OsStr::from_bytes(b"bad\xffname.txt"));
    let bad_dir = tree.root().join(OsStr::from_bytes(b"sub\xfe"));
    std::fs::write(&bad_file, b"x").unwrap();
    std::fs::create_dir(&bad_dir).unwrap();
    std::fs::write(bad_dir.join("inner.txt"), b"x").unwrap();

    assert_eq!(
        expand(&tree.root_spec()),
        vec![bad_file, tree.path("good.txt"), bad_dir.join("inner.txt")]
    );
    assert_eq!(
        expand(&format!("{}/*.txt", tree.root_spec())),
        vec![tree.path("good.txt")]
    );
}

#[test]
fn test_pattern_files_only_filters_directories() {
    init_logging();
    let tree = TestTree::builder()
        .files(&["run-1.log", "run-2/inner.log"])
        .build()
        .unwrap();
    let pattern = format!("{}/run-*", tree.root_spec());

    assert_eq!(expand(&pattern).len(), 2);

    let expander = PathExpander::new(ExpandOptions::new().with_pattern_files_only(true));
    assert_eq!(expander.expand(&pattern), vec![tree.path("run-1.log")]);
}

#[cfg(unix)]
#[test]
#[serial]
fn test_tilde_pattern_resolves_against_home() {
    init_logging();
    let tree = TestTree::builder()
        .files(&["notes/a.md", "notes/b.md", "notes/c.txt"])
        .build()
        .unwrap();

    let saved_home = std::env::var_os("HOME");
    unsafe { std::env::set_var("HOME", tree.root()) };

    let with_tilde = expand("~/notes/*.md");
    let without_tilde =
        PathExpander::new(ExpandOptions::new().with_tilde_expansion(false)).expand("~/notes/*.md");

    match saved_home {
        Some(home) => unsafe { std::env::set_var("HOME", home) },
        None => unsafe { std::env::remove_var("HOME") },
    }

    assert_eq!(
        sorted(with_tilde),
        vec![tree.path("notes/a.md"), tree.path("notes/b.md")]
    );
    assert!(without_tilde.is_empty());
}

#[test]
#[serial]
fn test_expander_from_loaded_config() {
    init_logging();
    let tree = TestTree::builder()
        .file_with_content("config.toml", b"[expand]\nmax_depth = 1\n")
        .files(&["data/top.csv", "data/nested/deep.csv"])
        .build()
        .unwrap();

    let config = ConfigLoader::with_path(tree.path("config.toml"))
        .load()
        .unwrap();
    let expander = PathExpander::from_config(&config);

    assert_eq!(expander.options().max_depth, Some(1));
    assert_eq!(
        expander.expand(&tree.spec("data")),
        vec![tree.path("data/top.csv")]
    );
}

#[test]
fn test_expander_shared_across_threads() {
    init_logging();
    let tree = TestTree::builder()
        .files(&["t/1", "t/2", "t/3/4"])
        .build()
        .unwrap();
    let expander = std::sync::Arc::new(PathExpander::default());
    let spec = tree.spec("t");
    let expected = expander.expand(&spec);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let expander = expander.clone();
            let spec = spec.clone();
            std::thread::spawn(move || expander.expand(&spec))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
