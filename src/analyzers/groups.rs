//! Fixed table of direction groups.

use anyhow::anyhow;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Directions that collapse into the synthetic "Backend" entry.
pub const BACKEND: &[&str] = &[
    "Backend - Python",
    "Backend - NodeJS",
    "Backend - Kotlin",
    "Backend - Java",
    "Backend - Golang",
    "Backend - Custom",
    "Backend - .NET",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    Backend,
    Frontend,
    Ios,
    Android,
    Ml,
}

impl GroupKey {
    pub const ALL: [GroupKey; 5] = [
        GroupKey::Backend,
        GroupKey::Frontend,
        GroupKey::Ios,
        GroupKey::Android,
        GroupKey::Ml,
    ];

    /// Direction names that belong to this group, in display order.
    pub fn members(self) -> &'static [&'static str] {
        match self {
            GroupKey::Backend => BACKEND,
            GroupKey::Frontend => &["Frontend"],
            GroupKey::Ios => &["Mobile - iOS"],
            GroupKey::Android => &["Mobile - Android"],
            GroupKey::Ml => &["ML"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GroupKey::Backend => "backend",
            GroupKey::Frontend => "frontend",
            GroupKey::Ios => "ios",
            GroupKey::Android => "android",
            GroupKey::Ml => "ml",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        GroupKey::ALL
            .into_iter()
            .find(|g| g.as_str() == key)
            .ok_or_else(|| {
                anyhow!("unknown group '{s}' (expected one of backend, frontend, ios, android, ml)")
            })
    }
}

/// Returns `true` if `direction` is part of the backend group.
pub fn is_backend(direction: &str) -> bool {
    BACKEND.contains(&direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_round_trip_names() {
        for key in GroupKey::ALL {
            assert_eq!(key.as_str().parse::<GroupKey>().unwrap(), key);
        }
        assert_eq!("  ML ".parse::<GroupKey>().unwrap(), GroupKey::Ml);
    }

    #[test]
    fn test_group_key_unknown() {
        assert!("devops".parse::<GroupKey>().is_err());
    }

    #[test]
    fn test_members() {
        assert_eq!(GroupKey::Backend.members().len(), 7);
        assert_eq!(GroupKey::Ios.members(), &["Mobile - iOS"]);
        assert!(is_backend("Backend - .NET"));
        assert!(!is_backend("Frontend"));
    }
}
