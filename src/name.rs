use crate::error::RequiresError;
use std::fmt;
use std::str::FromStr;

pub const MAX_NAME_LENGTH: usize = 128;

/// A repository, branch, tag or site name: `[a-zA-Z0-9-_.]{1,128}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn parse(value: &str) -> Result<Self, RequiresError> {
        let invalid = |reason: String| RequiresError::InvalidName {
            value: value.to_string(),
            reason,
        };

        if value.is_empty() {
            return Err(invalid("required".to_string()));
        }
        let length = value.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(invalid(format!(
                "at most {MAX_NAME_LENGTH} characters (it has {length})"
            )));
        }
        if !value.chars().all(is_name_char) {
            return Err(invalid(
                "only alphanumeric and \"-_.\" characters allowed".to_string(),
            ));
        }
        if value == "." || value == ".." {
            return Err(invalid("\".\" and \"..\" are not allowed".to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

impl FromStr for Name {
    type Err = RequiresError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(value: &str) -> String {
        match Name::parse(value) {
            Err(RequiresError::InvalidName { reason, .. }) => reason,
            other => panic!("expected InvalidName, got {other:?}"),
        }
    }

    #[test]
    fn accepts_allowed_characters() {
        for value in ["master", "release-1.2", "feature_x", "A.b-C_9", "..."] {
            let name = Name::parse(value).expect("valid name");
            assert_eq!(name.as_str(), value);
        }
    }

    #[test]
    fn rejects_dot_segments() {
        assert_eq!(reason("."), "\".\" and \"..\" are not allowed");
        assert_eq!(reason(".."), "\".\" and \"..\" are not allowed");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(reason(""), "required");
    }

    #[test]
    fn rejects_too_long() {
        let value = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(reason(&value), "at most 128 characters (it has 129)");
        assert!(Name::parse(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn rejects_other_characters() {
        for value in ["feature/x", "a b", "naïve", "tag@1"] {
            assert_eq!(
                reason(value),
                "only alphanumeric and \"-_.\" characters allowed"
            );
        }
    }
}
