//! Documentation catalog for docsite.
//!
//! The catalog is an ordered list of [`Category`] values, each owning an
//! ordered tree of [`Section`]s. It is the data model shared by the remote
//! client, the backend server and the page views.
//!
//! Two sources produce a catalog:
//!
//! - [`Catalog::builtin`]: the static catalog compiled into the binary
//! - [`Catalog::from_json_file`]: a JSON file in the `GET /categories` shape
//!
//! # Example
//!
//! ```
//! use docsite_catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let section = catalog.find_section("quick-start").unwrap();
//! assert_eq!(section.title, "Quick Start");
//! ```

mod builtin;
mod catalog;
mod types;

pub use builtin::{DEFAULT_SECTION_ID, LAZY_CONTENT_PLACEHOLDER};
pub use catalog::{Catalog, CatalogError, Sections};
pub use types::{Category, SearchResults, Section, SectionContent};
