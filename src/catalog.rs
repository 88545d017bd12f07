//! Category catalog
//!
//! The fixed menu the ordering flow walks through. Loaded once at startup and
//! shared read-only for the lifetime of the process.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// WhatsApp list messages hold at most this many rows
pub const MAX_LIST_ROWS: usize = 10;
/// Longest row title WhatsApp accepts, in characters
pub const MAX_ROW_TITLE_CHARS: usize = 24;

/// Errors raised while loading or validating a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog has no categories")]
    Empty,
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),
    #[error("Category has no items: {0}")]
    EmptyCategory(String),
    #[error("{list} has {count} entries, a list holds at most 10")]
    TooManyRows { list: String, count: usize },
    #[error("Longer than 24 characters: {0}")]
    TitleTooLong(String),
}

/// A named group of orderable items
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
    pub items: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, items: &[&str]) -> Self {
        Self {
            name: name.into(),
            items: items.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Ordered, validated set of categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names and empty categories.
    ///
    /// Names are compared case-insensitively because lookups are. Every menu
    /// must also fit in a single WhatsApp list message.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }
        check_list_rows("Category menu", categories.iter().map(|c| c.name.as_str()))?;

        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.name.to_lowercase()) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
            if category.items.is_empty() {
                return Err(CatalogError::EmptyCategory(category.name.clone()));
            }
            check_list_rows(&category.name, category.items.iter().map(String::as_str))?;
        }

        Ok(Self { categories })
    }

    /// Parse a catalog from JSON: `[{"name": "...", "items": ["..."]}]`
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        Self::new(categories)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Category names in menu order
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Find a category by name, ignoring case.
    ///
    /// Free-text replies arrive lower-cased while list replies keep the
    /// catalog spelling, so both must resolve to the same entry.
    pub fn find(&self, name: &str) -> Option<&Category> {
        let wanted = name.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
    }
}

fn check_list_rows<'a>(
    list: &str,
    titles: impl IntoIterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut count = 0;
    for title in titles {
        if title.chars().count() > MAX_ROW_TITLE_CHARS {
            return Err(CatalogError::TitleTooLong(title.to_string()));
        }
        count += 1;
    }

    if count > MAX_LIST_ROWS {
        return Err(CatalogError::TooManyRows {
            list: list.to_string(),
            count,
        });
    }
    Ok(())
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            categories: vec![
                Category::new("Fruits", &["Apple", "Banana", "Mango"]),
                Category::new("Nuts", &["Almonds", "Cashews", "Walnuts"]),
                Category::new("Chocolates", &["Dairy Milk", "KitKat", "Snickers"]),
            ],
        }
    }
}
