// Categories written into an empty store on first start.
use shared::models::{Category, CategoryKind};

const EXPENSE: &[(&str, &str, &str)] = &[
    ("Food", "food", "#FF9800"),
    ("Transport", "car", "#2196F3"),
    ("Shopping", "shop", "#9C27B0"),
    ("Entertainment", "entertainment", "#FF5722"),
    ("Medical", "medical", "#4CAF50"),
    ("Education", "education", "#009688"),
    ("Housing", "house", "#795548"),
    ("Gifts", "gift", "#E91E63"),
    ("Social", "social", "#673AB7"),
    ("Wedding", "wedding", "#FF4081"),
    ("Funeral", "funeral", "#607D8B"),
    ("Birthday", "birthday", "#FFC107"),
    ("Red Envelope", "gift-money", "#F44336"),
    ("Accident", "accident", "#FF5722"),
    ("Celebration", "celebration", "#9C27B0"),
];

const INCOME: &[(&str, &str, &str)] = &[
    ("Salary", "salary", "#4CAF50"),
    ("Bonus", "bonus", "#FFC107"),
    ("Part-time", "part-time", "#3F51B5"),
    ("Side Income", "extra-income", "#9C27B0"),
    ("Rent", "rent", "#FF5722"),
    ("Dividends", "dividend", "#2196F3"),
    ("Allowance", "subsidy", "#607D8B"),
];

/// 15 expense categories (ids 1-15) followed by 7 income categories (ids 16-22).
/// Ids are unique across both kinds.
pub fn default_categories() -> Vec<Category> {
    EXPENSE
        .iter()
        .map(|entry| (entry, CategoryKind::Expense))
        .chain(INCOME.iter().map(|entry| (entry, CategoryKind::Income)))
        .enumerate()
        .map(|(idx, (&(name, icon, color), kind))| Category {
            id: idx as i64 + 1,
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_counts_per_kind() {
        let categories = default_categories();
        assert_eq!(categories.len(), 22);
        assert_eq!(categories.iter().filter(|c| c.kind == CategoryKind::Expense).count(), 15);
        assert_eq!(categories.iter().filter(|c| c.kind == CategoryKind::Income).count(), 7);
    }

    #[test]
    fn test_default_ids_are_globally_unique() {
        let categories = default_categories();
        let ids: HashSet<i64> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), categories.len());
        assert_eq!(categories.first().map(|c| c.id), Some(1));
        assert_eq!(categories.last().map(|c| c.id), Some(22));
    }

    #[test]
    fn test_expense_precedes_income() {
        let categories = default_categories();
        assert!(categories[..15].iter().all(|c| c.kind == CategoryKind::Expense));
        assert!(categories[15..].iter().all(|c| c.kind == CategoryKind::Income));
        assert_eq!(categories[15].name, "Salary");
        assert_eq!(categories[15].id, 16);
    }
}
