//! Catalog data types in their JSON wire shape.

use serde::{Deserialize, Serialize};

/// A documentation unit with optional nested subsections.
///
/// `content` is optional because listings returned by the remote backend may
/// omit bodies until a section is fetched individually.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Identifier, unique across the whole catalog.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short summary shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markdown body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Nested sections. Empty means the section is a leaf.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Section>,
}

impl Section {
    /// Create a leaf section with content.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            content: Some(content.into()),
            subsections: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a subsection.
    #[must_use]
    pub fn with_subsection(mut self, section: Section) -> Self {
        self.subsections.push(section);
        self
    }
}

/// Top-level grouping of sections, shown as a labeled sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier, unique among categories.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Top-level sections, in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Category {
    /// Create an empty category.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            sections: Vec::new(),
        }
    }

    /// Set the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Append a top-level section.
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

/// Body of `GET /section/:id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionContent {
    /// Section identifier.
    pub id: String,
    /// Markdown body.
    pub content: String,
}

/// Body of `GET /search?q=`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching sections, in catalog order.
    pub results: Vec<Section>,
}
