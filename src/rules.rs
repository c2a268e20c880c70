//! Recognition rules for dependency manifest files.
//!
//! Every rule is matched case-insensitively against the file name, and for
//! [`RuleKind::InDirectory`] also against the name of the parent directory.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Exact file name.
    FileName(&'static str),
    /// File name starting with one of `prefixes`, continuing with word
    /// characters or `-`, and ending in one of `extensions`.
    Prefixed {
        prefixes: &'static [&'static str],
        extensions: &'static [&'static str],
    },
    /// Any word-character file name with one of `extensions`, inside a
    /// directory called `directory`.
    InDirectory {
        directory: &'static str,
        extensions: &'static [&'static str],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestRule {
    pub name: &'static str,
    pub kind: RuleKind,
}

pub const RULES: &[ManifestRule] = &[
    ManifestRule {
        name: "setup-py",
        kind: RuleKind::FileName("setup.py"),
    },
    ManifestRule {
        name: "tox-ini",
        kind: RuleKind::FileName("tox.ini"),
    },
    ManifestRule {
        name: "buildout-cfg",
        kind: RuleKind::FileName("buildout.cfg"),
    },
    ManifestRule {
        name: "versions-cfg",
        kind: RuleKind::FileName("versions.cfg"),
    },
    ManifestRule {
        name: "requirements-file",
        kind: RuleKind::Prefixed {
            prefixes: &["req", "pip", "dep"],
            extensions: &["txt", "pip"],
        },
    },
    ManifestRule {
        name: "requirements-dir",
        kind: RuleKind::InDirectory {
            directory: "requirements",
            extensions: &["pip", "txt"],
        },
    },
];

impl ManifestRule {
    pub fn matches(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        let file_name = file_name.to_lowercase();

        match self.kind {
            RuleKind::FileName(expected) => file_name == expected,
            RuleKind::Prefixed {
                prefixes,
                extensions,
            } => {
                let Some(stem) = strip_extension(&file_name, extensions) else {
                    return false;
                };
                prefixes.iter().any(|prefix| {
                    stem.strip_prefix(prefix)
                        .is_some_and(|rest| rest.chars().all(is_word_char))
                })
            }
            RuleKind::InDirectory {
                directory,
                extensions,
            } => {
                let in_directory = path
                    .parent()
                    .and_then(|parent| parent.file_name())
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.eq_ignore_ascii_case(directory));
                in_directory
                    && strip_extension(&file_name, extensions)
                        .is_some_and(|stem| stem.chars().all(is_word_char))
            }
        }
    }
}

/// First rule recognising `path` as a manifest.
pub fn match_manifest(path: &Path) -> Option<&'static ManifestRule> {
    RULES.iter().find(|rule| rule.matches(path))
}

fn strip_extension<'a>(file_name: &'a str, extensions: &[&str]) -> Option<&'a str> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    extensions.contains(&extension).then_some(stem)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
