//! Turn absolute manifest paths into portable relative URLs.
//!
//! All URLs of one upload share a single root: the deepest directory common
//! to every path. Separators are always `/` and drive prefixes never leak
//! into the result.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    pub absolute_path: PathBuf,
    pub relative_url: String,
}

/// Compute the relative URL of every path, in sorted path order.
pub fn to_urls(paths: &BTreeSet<PathBuf>) -> Vec<ManifestFile> {
    if paths.len() == 1 {
        return paths
            .iter()
            .map(|path| ManifestFile {
                absolute_path: path.clone(),
                relative_url: parts(path).pop().unwrap_or_default(),
            })
            .collect();
    }

    let split: Vec<Vec<String>> = paths.iter().map(|path| parts(path)).collect();
    let shortest = split.iter().map(Vec::len).min().unwrap_or(0);
    let index = common_index_of(&split).min(shortest.saturating_sub(1));

    paths
        .iter()
        .zip(split)
        .map(|(path, parts)| ManifestFile {
            absolute_path: path.clone(),
            relative_url: parts[index..].join("/"),
        })
        .collect()
}

/// Number of leading components shared by every path.
///
/// Components are compared case-insensitively on Windows.
pub fn common_index<P: AsRef<Path>>(paths: &[P]) -> usize {
    let split: Vec<Vec<String>> = paths.iter().map(|path| parts(path.as_ref())).collect();
    common_index_of(&split)
}

fn common_index_of(split: &[Vec<String>]) -> usize {
    let Some((first, rest)) = split.split_first() else {
        return 0;
    };
    let shortest = split.iter().map(Vec::len).min().unwrap_or(0);

    (0..shortest)
        .take_while(|&i| {
            let expected = comparable(&first[i]);
            rest.iter().all(|other| comparable(&other[i]) == expected)
        })
        .count()
}

/// Path components without drive prefix or root marker.
fn parts(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

fn comparable(part: &str) -> String {
    if cfg!(windows) {
        part.to_lowercase()
    } else {
        part.to_string()
    }
}
