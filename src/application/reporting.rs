use serde::{Deserialize, Serialize};

use crate::domain::DateRange;

/// Spending report over an optional date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub range: DateRange,
    pub total: f64,
    pub categories: Vec<CategorySpending>,
}

impl SpendingSummary {
    /// Whether no expense fell inside the range.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// One category section of a [`SpendingSummary`].
///
/// `total` and `count` cover every expense in the category, including those
/// recorded without a subcategory, which have no entry in `subcategories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub total: f64,
    pub count: i64,
    pub subcategories: Vec<SubcategorySpending>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategorySpending {
    pub name: String,
    pub total: f64,
    pub count: i64,
}

/// Lifetime totals of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifetimeSummary {
    pub location: String,
    pub total: f64,
}

// Helper struct for repository aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingGroup {
    pub category: String,
    pub subcategory: Option<String>,
    pub total: f64,
    pub count: i64,
}

/// Fold per-(category, subcategory) groups into category sections.
///
/// Groups must arrive ordered by category; the order of groups within a
/// category is kept for the subcategory lines.
pub fn group_by_category(groups: Vec<SpendingGroup>) -> Vec<CategorySpending> {
    let mut categories: Vec<CategorySpending> = Vec::new();

    for group in groups {
        let starts_section = categories
            .last()
            .is_none_or(|last| last.category != group.category);
        if starts_section {
            categories.push(CategorySpending {
                category: group.category.clone(),
                total: 0.0,
                count: 0,
                subcategories: Vec::new(),
            });
        }
        let Some(section) = categories.last_mut() else {
            continue;
        };

        section.total += group.total;
        section.count += group.count;
        if let Some(name) = group.subcategory {
            section.subcategories.push(SubcategorySpending {
                name,
                total: group.total,
                count: group.count,
            });
        }
    }

    categories
}
