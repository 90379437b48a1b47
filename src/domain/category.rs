use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display-only taxonomy of category names to subcategory names.
///
/// Recorded expenses are never checked against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryHierarchy {
    categories: BTreeMap<String, Vec<String>>,
}

impl CategoryHierarchy {
    /// Parse a hierarchy from a JSON object of `{"Category": ["Sub", ...]}`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Categories in alphabetical order, each with its subcategories sorted.
    pub fn sorted(&self) -> Vec<(&str, Vec<&str>)> {
        self.categories
            .iter()
            .map(|(category, subs)| {
                let mut subs: Vec<&str> = subs.iter().map(String::as_str).collect();
                subs.sort_unstable();
                (category.as_str(), subs)
            })
            .collect()
    }
}

impl FromIterator<(String, Vec<String>)> for CategoryHierarchy {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}
