//! Sidebar navigation.
//!
//! A projection of categories and the active section id to markup, plus one
//! outbound event per activation. The sidebar keeps no state of its own.

use std::fmt::Write;

use docsite_catalog::Category;

use crate::html::escape;

/// Sidebar presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarVariant {
    /// Always-visible column on wide viewports.
    Static,
    /// Dismissable overlay on small viewports. Closes after a selection.
    Overlay,
}

/// Event emitted by the sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarEvent {
    /// A section label was activated.
    SectionClick(String),
    /// The overlay asked to be dismissed.
    Close,
}

/// Receiver of sidebar events, usually the page shell.
pub trait SidebarHandler {
    /// A section label was activated.
    fn on_section_click(&mut self, section_id: &str);

    /// The overlay asked to be dismissed.
    fn on_close(&mut self) {}
}

/// Collects events, for tests and logging.
impl SidebarHandler for Vec<SidebarEvent> {
    fn on_section_click(&mut self, section_id: &str) {
        self.push(SidebarEvent::SectionClick(section_id.to_owned()));
    }

    fn on_close(&mut self) {
        self.push(SidebarEvent::Close);
    }
}

/// Sidebar navigation over a category list.
#[derive(Clone, Copy, Debug)]
pub struct Sidebar {
    variant: SidebarVariant,
}

impl Sidebar {
    /// Create a sidebar with the given presentation.
    #[must_use]
    pub fn new(variant: SidebarVariant) -> Self {
        Self { variant }
    }

    /// Activate a section label.
    ///
    /// Emits [`SidebarEvent::SectionClick`]; the overlay variant then emits
    /// [`SidebarEvent::Close`].
    pub fn click(&self, section_id: &str, handler: &mut impl SidebarHandler) {
        handler.on_section_click(section_id);
        if self.variant == SidebarVariant::Overlay {
            handler.on_close();
        }
    }

    /// Activate the overlay close button.
    pub fn close(&self, handler: &mut impl SidebarHandler) {
        if self.variant == SidebarVariant::Overlay {
            handler.on_close();
        }
    }

    /// Render the sidebar.
    ///
    /// Lists each category with its top-level sections. The section whose id
    /// equals `active_section` is marked with `aria-current`.
    pub fn render(&self, categories: &[Category], active_section: &str) -> String {
        let mut html = String::with_capacity(2048);

        match self.variant {
            SidebarVariant::Static => {
                html.push_str("<aside class=\"sidebar sidebar-static\">\n");
            }
            SidebarVariant::Overlay => {
                // Closing keeps the current section selected
                let close_href = format!("?section={}", escape(active_section));
                html.push_str("<div class=\"sidebar-overlay\">\n");
                let _ = writeln!(
                    html,
                    "<a class=\"sidebar-backdrop\" href=\"{close_href}\" \
                     aria-label=\"Close navigation\"></a>"
                );
                html.push_str("<aside class=\"sidebar sidebar-drawer\">\n");
                let _ = writeln!(
                    html,
                    "<a class=\"sidebar-close\" href=\"{close_href}\" \
                     aria-label=\"Close navigation\">&times;</a>"
                );
            }
        }

        html.push_str("<nav>\n");
        for category in categories {
            render_category(&mut html, category, active_section);
        }
        html.push_str("</nav>\n</aside>\n");

        if self.variant == SidebarVariant::Overlay {
            html.push_str("</div>\n");
        }
        html
    }
}

fn render_category(html: &mut String, category: &Category, active_section: &str) {
    let _ = writeln!(
        html,
        "<div class=\"sidebar-category\" data-category=\"{}\">",
        escape(&category.id)
    );
    let _ = writeln!(
        html,
        "<h3 class=\"sidebar-category-title\">{}</h3>",
        escape(&category.title)
    );
    html.push_str("<ul>\n");
    for section in &category.sections {
        let is_active = section.id == active_section;
        let _ = writeln!(
            html,
            "<li><a class=\"sidebar-link{}\" href=\"?section={}\" data-section=\"{}\"{}>{}</a></li>",
            if is_active { " active" } else { "" },
            escape(&section.id),
            escape(&section.id),
            if is_active { " aria-current=\"page\"" } else { "" },
            escape(&section.title)
        );
    }
    html.push_str("</ul>\n</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsite_catalog::Catalog;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_static_click_emits_only_section_event() {
        let mut events = Vec::new();

        Sidebar::new(SidebarVariant::Static).click("quick-start", &mut events);

        assert_eq!(events, vec![SidebarEvent::SectionClick("quick-start".to_owned())]);
    }

    #[test]
    fn test_overlay_click_emits_section_then_close() {
        let mut events = Vec::new();

        Sidebar::new(SidebarVariant::Overlay).click("quick-start", &mut events);

        assert_eq!(
            events,
            vec![
                SidebarEvent::SectionClick("quick-start".to_owned()),
                SidebarEvent::Close
            ]
        );
    }

    #[test]
    fn test_static_close_is_ignored() {
        let mut events = Vec::new();

        Sidebar::new(SidebarVariant::Static).close(&mut events);

        assert!(events.is_empty());
    }

    #[test]
    fn test_render_lists_categories_and_marks_active() {
        let catalog = Catalog::builtin();

        let html = Sidebar::new(SidebarVariant::Static).render(catalog.categories(), "quick-start");

        assert!(html.contains("Getting Started"));
        assert!(html.contains("API Reference"));
        assert!(html.contains(
            "<a class=\"sidebar-link active\" href=\"?section=quick-start\" \
             data-section=\"quick-start\" aria-current=\"page\">Quick Start</a>"
        ));
        assert!(html.contains(
            "<a class=\"sidebar-link\" href=\"?section=installation\" \
             data-section=\"installation\">Installation</a>"
        ));
        assert_eq!(html.matches("aria-current").count(), 1);
    }

    #[test]
    fn test_render_overlay_has_close_button() {
        let html = Sidebar::new(SidebarVariant::Overlay).render(&[], "");

        assert!(html.contains("sidebar-overlay"));
        assert!(html.contains("sidebar-close"));
    }
}
