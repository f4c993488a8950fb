//! Documentation browser views for docsite.
//!
//! Views are plain state plus HTML rendering, with no UI framework:
//!
//! - [`Sidebar`]: category and section list, emitting [`SidebarEvent`]s
//! - [`SectionTree`]: recursive expand/collapse state keyed by section id
//! - [`ContentPanel`]: loading / error / loaded / empty rendering of a query
//! - [`DocsPage`]: page shell owning the active section and sidebar state
//!
//! Data comes from a [`ContentSource`]: either the static
//! [`Catalog`](docsite_catalog::Catalog) or a remote
//! [`DocsClient`](docsite_client::DocsClient).

mod html;
mod page;
mod panel;
mod section_tree;
mod sidebar;
mod source;

pub use html::{escape, render_markdown};
pub use page::DocsPage;
pub use panel::ContentPanel;
pub use section_tree::{Expansion, SUBSTITUTION_DELAY, SectionTree};
pub use sidebar::{Sidebar, SidebarEvent, SidebarHandler, SidebarVariant};
pub use source::ContentSource;
