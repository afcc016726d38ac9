//! Group model.

use serde::{Deserialize, Serialize};

/// A group (list) in the Folk workspace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub id: String,
    pub name: String,
}

impl Group {
    /// Resolve a group by name: case-insensitive exact match first, then substring.
    pub fn resolve<'a>(groups: &'a [Group], name: &str) -> Option<&'a Group> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        groups
            .iter()
            .find(|group| group.name.to_lowercase() == needle)
            .or_else(|| {
                groups
                    .iter()
                    .find(|group| group.name.to_lowercase().contains(&needle))
            })
    }
}
