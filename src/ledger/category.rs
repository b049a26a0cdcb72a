use std::collections::BTreeSet;

/// Categories pre-seeded into every fresh ledger.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Transportation",
    "Entertainment",
    "Utilities",
    "Salary",
    "Other",
];

/// Builds the category set for a new ledger.
pub fn default_categories() -> BTreeSet<String> {
    DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect()
}
