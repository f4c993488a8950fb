//! Catalog lookup, search and validation.

use std::collections::HashSet;
use std::path::Path;

use crate::builtin;
use crate::{Category, SearchResults, Section, SectionContent};

/// Catalog loading or validation error.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// I/O error reading a catalog file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Catalog file is not valid JSON in the `Category[]` shape.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A section id appears more than once.
    #[error("duplicate section id: {0}")]
    DuplicateId(String),
}

/// Ordered list of categories with lookup helpers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Create a catalog from categories.
    ///
    /// Does not validate; call [`Catalog::validate`] for untrusted input.
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The static catalog compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin::categories())
    }

    /// Load and validate a catalog from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let categories: Vec<Category> = serde_json::from_str(&content)?;
        let catalog = Self::new(categories);
        catalog.validate()?;
        tracing::debug!(path = %path.display(), "Loaded catalog");
        Ok(catalog)
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Consume the catalog, returning its categories.
    #[must_use]
    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    /// Iterate over every section, depth-first in document order.
    pub fn sections(&self) -> Sections<'_> {
        Sections::new(&self.categories)
    }

    /// Find a section anywhere in the tree.
    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.sections().find(|section| section.id == id)
    }

    /// Content of a section as served by `GET /section/:id`.
    ///
    /// Sections without a body yield empty content.
    pub fn section_content(&self, id: &str) -> Option<SectionContent> {
        self.find_section(id).map(|section| SectionContent {
            id: section.id.clone(),
            content: section.content.clone().unwrap_or_default(),
        })
    }

    /// Case-insensitive substring search over titles, descriptions and bodies.
    ///
    /// Matches are returned in catalog order. A blank query matches nothing.
    pub fn search(&self, query: &str) -> SearchResults {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return SearchResults::default();
        }

        let contains = |text: &str| text.to_lowercase().contains(&needle);
        let results = self
            .sections()
            .filter(|section| {
                contains(&section.title)
                    || section.description.as_deref().is_some_and(contains)
                    || section.content.as_deref().is_some_and(contains)
            })
            .cloned()
            .collect();

        SearchResults { results }
    }

    /// Check that every section id is unique across the catalog.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for section in self.sections() {
            if !seen.insert(section.id.as_str()) {
                return Err(CatalogError::DuplicateId(section.id.clone()));
            }
        }
        Ok(())
    }
}

impl From<Vec<Category>> for Catalog {
    fn from(categories: Vec<Category>) -> Self {
        Self::new(categories)
    }
}

/// Depth-first iterator over all sections of a catalog.
pub struct Sections<'a> {
    stack: Vec<&'a Section>,
}

impl<'a> Sections<'a> {
    /// Iterate over the sections of a category list.
    pub fn new(categories: &'a [Category]) -> Self {
        // Reversed so that popping yields document order
        let stack = categories
            .iter()
            .rev()
            .flat_map(|category| category.sections.iter().rev())
            .collect();
        Self { stack }
    }
}

impl<'a> Iterator for Sections<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        let section = self.stack.pop()?;
        self.stack.extend(section.subsections.iter().rev());
        Some(section)
    }
}
