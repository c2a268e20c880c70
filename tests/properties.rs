//! Property-based tests for path normalization.
//!
//! Paths are generated as component lists under `/` so the expected
//! relative URLs can be derived independently.

#![cfg(unix)]

use proptest::prelude::*;
use requires::normalize::{common_index, to_urls};
use std::collections::BTreeSet;
use std::path::PathBuf;

fn component_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,6}"
}

fn path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(component_strategy(), 1..6)
}

fn to_path(parts: &[String]) -> PathBuf {
    PathBuf::from(format!("/{}", parts.join("/")))
}

proptest! {
    #[test]
    fn urls_reconstruct_original_paths(
        prefix in prop::collection::vec(component_strategy(), 0..4),
        suffixes in prop::collection::vec(path_strategy(), 2..6),
    ) {
        let paths: BTreeSet<PathBuf> = suffixes
            .iter()
            .map(|suffix| to_path(&[prefix.clone(), suffix.clone()].concat()))
            .collect();
        prop_assume!(paths.len() > 1);
        let as_vec: Vec<&PathBuf> = paths.iter().collect();
        let index = common_index(&as_vec);
        prop_assume!(paths.iter().all(|path| path.components().count() - 1 > index));

        let files = to_urls(&paths);
        let urls: BTreeSet<&str> = files.iter().map(|file| file.relative_url.as_str()).collect();
        prop_assert_eq!(urls.len(), files.len(), "urls must be unique");

        for file in &files {
            prop_assert!(!file.relative_url.starts_with('/'));
            let shared: Vec<String> = file
                .absolute_path
                .iter()
                .skip(1)
                .take(index)
                .map(|part| part.to_string_lossy().into_owned())
                .collect();
            let rebuilt = to_path(&[shared, vec![file.relative_url.clone()]].concat());
            prop_assert_eq!(&rebuilt, &file.absolute_path);
        }
    }

    #[test]
    fn singleton_is_basename(parts in path_strategy()) {
        let path = to_path(&parts);
        let files = to_urls(&BTreeSet::from([path]));
        prop_assert_eq!(files.len(), 1);
        prop_assert_eq!(&files[0].relative_url, parts.last().unwrap());
    }

    #[test]
    fn siblings_are_bare_filenames(
        dir in prop::collection::vec(component_strategy(), 0..5),
        first in component_strategy(),
        second in component_strategy(),
    ) {
        prop_assume!(first != second);
        let a = to_path(&[dir.clone(), vec![first.clone()]].concat());
        let b = to_path(&[dir.clone(), vec![second.clone()]].concat());
        prop_assert_eq!(common_index(&[&a, &b]), dir.len());

        let files = to_urls(&BTreeSet::from([a, b]));
        for file in &files {
            prop_assert!(!file.relative_url.contains('/'));
        }
    }

    #[test]
    fn disjoint_roots_keep_full_paths(
        a in path_strategy(),
        b in path_strategy(),
    ) {
        prop_assume!(a[0] != b[0]);
        let (pa, pb) = (to_path(&a), to_path(&b));
        prop_assert_eq!(common_index(&[&pa, &pb]), 0);

        let files = to_urls(&BTreeSet::from([pa, pb]));
        for file in &files {
            let expected = file
                .absolute_path
                .to_string_lossy()
                .trim_start_matches('/')
                .to_string();
            prop_assert_eq!(&file.relative_url, &expected);
        }
    }
}
