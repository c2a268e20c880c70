//! Expand user-supplied paths, directories and glob patterns into the set of
//! manifest files they contain.

use crate::error::RequiresError;
use crate::rules::match_manifest;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Manifest files found for one command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPaths {
    pub argument: String,
    pub paths: BTreeSet<PathBuf>,
}

/// clap value parser for `PATH` arguments.
pub fn parse_path_argument(value: &str) -> Result<DiscoveredPaths, RequiresError> {
    Ok(DiscoveredPaths {
        argument: value.to_string(),
        paths: discover(value)?,
    })
}

/// Find every manifest file designated by `argument`.
///
/// An argument naming an existing path is taken literally; otherwise it is
/// expanded as a glob pattern relative to the current directory.
///
/// Fails when the argument designates no manifest at all.
pub fn discover(argument: &str) -> Result<BTreeSet<PathBuf>, RequiresError> {
    let cwd = std::env::current_dir().map_err(|source| RequiresError::Io {
        path: PathBuf::from("."),
        source,
    })?;

    let literal = normalize_lexically(&cwd.join(argument));
    let candidates = if literal.exists() {
        vec![literal]
    } else {
        expand(argument, &cwd)?
    };

    let mut found = BTreeSet::new();
    for path in candidates {
        if path.is_dir() {
            walk(&path, &mut found);
        } else if path.is_file() {
            store(path, &mut found);
        }
    }

    if found.is_empty() {
        return Err(RequiresError::NoManifests {
            argument: argument.to_string(),
        });
    }
    Ok(found)
}

/// Union of the manifests found for several arguments.
pub fn merge<'a>(discovered: impl IntoIterator<Item = &'a DiscoveredPaths>) -> BTreeSet<PathBuf> {
    discovered
        .into_iter()
        .flat_map(|entry| entry.paths.iter().cloned())
        .collect()
}

fn walk(root: &Path, found: &mut BTreeSet<PathBuf>) {
    let entries = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_pruned(entry))
        .filter_map(Result::ok);

    for entry in entries {
        if entry.path().is_file() {
            store(entry.into_path(), found);
        }
    }
}

/// Version control and hidden directories are never searched.
fn is_pruned(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "CVS" || name.starts_with('.')
}

fn store(path: PathBuf, found: &mut BTreeSet<PathBuf>) {
    if let Some(rule) = match_manifest(&path) {
        tracing::debug!(path = %path.display(), rule = rule.name, "matched manifest");
        found.insert(path);
    }
}

fn expand(argument: &str, cwd: &Path) -> Result<Vec<PathBuf>, RequiresError> {
    let pattern = normalize_lexically(&escape_components(cwd).join(argument));
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let entries = glob::glob_with(&pattern.to_string_lossy(), options).map_err(|err| {
        RequiresError::Pattern {
            pattern: argument.to_string(),
            message: err.to_string(),
        }
    })?;
    Ok(entries.filter_map(Result::ok).collect())
}

/// Quote glob metacharacters so `dir` only ever matches itself.
fn escape_components(dir: &Path) -> PathBuf {
    dir.components()
        .map(|component| match component {
            Component::Normal(part) => PathBuf::from(Pattern::escape(&part.to_string_lossy())),
            other => PathBuf::from(other.as_os_str()),
        })
        .collect()
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
