//! Documentation page shell.
//!
//! Owns the view state of the documentation browser: which section is
//! active and whether the mobile sidebar is open. Composes the sidebar, the
//! content panel, the subsection tree and the static chrome around them.
//! Nothing is persisted; a new page starts from the defaults.
//!
//! Rendering reads cached source state only. Call [`DocsPage::load`] to
//! resolve the active section.

use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use docsite_catalog::{Category, DEFAULT_SECTION_ID, Section, Sections};
use docsite_client::FetchError;
use docsite_query::{Clock, QueryState, SystemClock};

use crate::html::escape;
use crate::panel::ContentPanel;
use crate::section_tree::{Expansion, SectionTree};
use crate::sidebar::{Sidebar, SidebarHandler, SidebarVariant};
use crate::source::ContentSource;

/// Product name shown in the navigation bar and footer.
const PRODUCT_NAME: &str = "DevKit";

/// Documentation page over a [`ContentSource`].
pub struct DocsPage<S> {
    source: S,
    clock: Arc<dyn Clock>,
    active_section_id: String,
    sidebar_open: bool,
    tree: SectionTree,
    /// Nodes toggled an odd number of times, in toggle order.
    toggled: Vec<String>,
}

impl<S: ContentSource> DocsPage<S> {
    /// Create a page showing [`DEFAULT_SECTION_ID`] with the sidebar closed.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            active_section_id: DEFAULT_SECTION_ID.to_owned(),
            sidebar_open: false,
            tree: SectionTree::new(),
            toggled: Vec::new(),
        }
    }

    /// Start on a different section.
    #[must_use]
    pub fn with_active_section(mut self, id: impl Into<String>) -> Self {
        self.active_section_id = id.into();
        self
    }

    /// Read time from a custom clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Id of the active section.
    pub fn active_section_id(&self) -> &str {
        &self.active_section_id
    }

    /// Whether the overlay sidebar is open.
    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Make `id` the active section and close the overlay sidebar.
    pub fn select_section(&mut self, id: &str) {
        tracing::debug!(section = id, "Section selected");
        id.clone_into(&mut self.active_section_id);
        self.sidebar_open = false;
    }

    /// Open the overlay sidebar.
    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
    }

    /// Close the overlay sidebar.
    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Flip the overlay sidebar.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Resolve the category listing and the active section.
    ///
    /// May block on the source. [`DocsPage::render`] never does; it shows
    /// whatever this (or a concurrent caller) has loaded so far.
    pub fn load(&self) {
        self.source.categories();
        self.source.section(&self.active_section_id);
    }

    /// Current category listing.
    pub fn categories(&self) -> QueryState<Vec<Category>, FetchError> {
        self.source.cached_categories()
    }

    /// The active section, looked up across all categories.
    ///
    /// `None` when the id is unknown or categories are unavailable.
    pub fn active_section(&self) -> Option<Section> {
        let categories = self.source.cached_categories().data?;
        Sections::new(&categories)
            .find(|section| section.id == self.active_section_id)
            .cloned()
    }

    /// Content panel state for the active section.
    ///
    /// A section that is listed but not fetched yet shows as loading, as
    /// does any section while the listing itself is not loaded.
    pub fn content_panel(&self) -> ContentPanel {
        let panel = ContentPanel::from_query(&self.source.cached_section(&self.active_section_id));
        if panel == ContentPanel::Empty && self.section_pending() {
            ContentPanel::Loading
        } else {
            panel
        }
    }

    fn section_pending(&self) -> bool {
        let categories = self.source.cached_categories();
        match categories.data {
            Some(categories) => {
                Sections::new(&categories).any(|section| section.id == self.active_section_id)
            }
            None => categories.error.is_none(),
        }
    }

    /// Flip a subsection of the active section.
    ///
    /// Returns the new state, or `None` if `id` is not below the active
    /// section.
    pub fn toggle_node(&mut self, id: &str) -> Option<Expansion> {
        let active = self.active_section()?;
        let (node, depth) = find_below(&active, id, 0)?;
        let expansion = self.tree.toggle(node, depth, self.clock.now());
        if let Some(pos) = self.toggled.iter().position(|t| t == id) {
            self.toggled.remove(pos);
        } else {
            self.toggled.push(id.to_owned());
        }
        Some(expansion)
    }

    /// Link that reproduces this page with node `id` toggled.
    ///
    /// Toggled nodes travel as a comma-separated `toggle` parameter.
    pub fn toggle_href(&self, id: &str) -> String {
        let mut ids: Vec<&str> = self
            .toggled
            .iter()
            .map(String::as_str)
            .filter(|t| *t != id)
            .collect();
        if ids.len() == self.toggled.len() {
            ids.push(id);
        }
        if ids.is_empty() {
            format!("?section={}", self.active_section_id)
        } else {
            format!("?section={}&toggle={}", self.active_section_id, ids.join(","))
        }
    }

    /// Time until the next pending placeholder substitution is due.
    pub fn next_substitution_in(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.tree
            .next_deadline()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Apply placeholder substitutions that are due, returning their ids.
    pub fn poll(&mut self) -> Vec<String> {
        self.tree.poll(self.clock.now())
    }

    /// Subsection tree state.
    pub fn tree(&self) -> &SectionTree {
        &self.tree
    }

    /// Render the full page.
    ///
    /// Never blocks on the source. Applies due substitutions first and
    /// schedules new ones for placeholder nodes that become visible,
    /// including the active section itself.
    pub fn render(&mut self) -> String {
        let now = self.clock.now();
        self.tree.poll(now);

        let categories = self.source.cached_categories().data.unwrap_or_default();
        let active = Sections::new(&categories)
            .find(|section| section.id == self.active_section_id)
            .cloned();
        let mut panel = self.content_panel();
        if let Some(section) = &active {
            // The panel shows the fetched body, which the listing may omit
            let mut shown = section.clone();
            if let ContentPanel::Loaded(content) = &panel {
                shown.content = Some(content.content.clone());
            }
            self.tree.activate(&shown, 0, now);
            if let (ContentPanel::Loaded(content), Some(applied)) =
                (&mut panel, self.tree.applied_content(&section.id))
            {
                applied.clone_into(&mut content.content);
            }
        }

        let mut html = String::with_capacity(8192);
        let title = active
            .as_ref()
            .map_or_else(|| "Documentation".to_owned(), |s| s.title.clone());

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        let _ = writeln!(
            html,
            "<title>{} - {PRODUCT_NAME} Docs</title>",
            escape(&title)
        );
        html.push_str("</head>\n<body>\n");

        self.render_navbar(&mut html);

        html.push_str("<div class=\"docs-layout\">\n");
        html.push_str(
            &Sidebar::new(SidebarVariant::Static).render(&categories, &self.active_section_id),
        );
        if self.sidebar_open {
            html.push_str(
                &Sidebar::new(SidebarVariant::Overlay).render(&categories, &self.active_section_id),
            );
        }

        html.push_str("<main class=\"docs-content\">\n");
        html.push_str(&panel.render(active.as_ref()));
        if let (ContentPanel::Loaded(_), Some(section)) = (&panel, &active) {
            let toggle_href = |id: &str| self.toggle_href(id);
            for child in &section.subsections {
                html.push_str(&self.tree.render(child, 1, &toggle_href));
            }
        }
        html.push_str("</main>\n</div>\n");

        render_footer(&mut html);
        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_navbar(&self, html: &mut String) {
        html.push_str("<header class=\"navbar\">\n");
        let _ = writeln!(
            html,
            "<a class=\"sidebar-toggle\" href=\"?section={}&amp;sidebar=open\" \
             aria-label=\"Open navigation\">&#9776;</a>",
            escape(&self.active_section_id)
        );
        let _ = writeln!(html, "<a class=\"brand\" href=\"/\">{PRODUCT_NAME}</a>");
        html.push_str("<nav class=\"navbar-links\"><a href=\"/docs\">Docs</a></nav>\n");
        html.push_str("</header>\n");
    }
}

/// Route sidebar events into page state.
impl<S: ContentSource> SidebarHandler for DocsPage<S> {
    fn on_section_click(&mut self, section_id: &str) {
        self.select_section(section_id);
    }

    fn on_close(&mut self) {
        self.close_sidebar();
    }
}

fn render_footer(html: &mut String) {
    html.push_str("<footer class=\"footer\">\n");
    let _ = writeln!(
        html,
        "<p>&copy; {PRODUCT_NAME}. Documentation content is provided as is.</p>"
    );
    html.push_str("</footer>\n");
}

/// Find `id` in the subsections of `root`, with its depth below `root`.
fn find_below<'a>(root: &'a Section, id: &str, depth: usize) -> Option<(&'a Section, usize)> {
    root.subsections.iter().find_map(|child| {
        if child.id == id {
            Some((child, depth + 1))
        } else {
            find_below(child, id, depth + 1)
        }
    })
}
