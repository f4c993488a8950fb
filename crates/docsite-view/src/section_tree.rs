//! Recursive section renderer with per-node expansion state.
//!
//! Expansion state lives in a map keyed by section id rather than on the
//! sections themselves, so the same catalog can back several trees. Nodes
//! shallower than depth 2 start expanded and deeper ones collapsed; toggling
//! a node only touches its own entry.
//!
//! A node whose content is exactly [`LAZY_CONTENT_PLACEHOLDER`] gets its
//! displayed content replaced [`SUBSTITUTION_DELAY`] after it is first
//! shown expanded. Due replacements are applied by [`SectionTree::poll`].

use std::collections::HashMap;
use std::fmt::Write;
use std::time::{Duration, Instant};

use docsite_catalog::{LAZY_CONTENT_PLACEHOLDER, Section};

use crate::html::{escape, render_markdown};

/// Delay before placeholder content is replaced.
pub const SUBSTITUTION_DELAY: Duration = Duration::from_millis(100);

/// Nodes shallower than this start expanded.
const EXPANDED_DEPTH_LIMIT: usize = 2;

/// Expansion state of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// Children and content hidden.
    Collapsed,
    /// Children and content shown.
    Expanded,
}

impl Expansion {
    /// State of a node that was never toggled.
    pub fn initial(depth: usize) -> Self {
        if depth < EXPANDED_DEPTH_LIMIT {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    /// The opposite state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

/// Placeholder replacement of one node.
#[derive(Debug)]
enum Substitution {
    Pending { due: Instant, content: String },
    Applied(String),
}

#[derive(Debug, Default)]
struct NodeState {
    /// `None` until the node is toggled.
    expansion: Option<Expansion>,
    substitution: Option<Substitution>,
}

/// Expansion and placeholder state of a rendered section tree.
#[derive(Debug)]
pub struct SectionTree {
    nodes: HashMap<String, NodeState>,
    delay: Duration,
}

impl Default for SectionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionTree {
    /// Create a tree with the standard substitution delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_delay(SUBSTITUTION_DELAY)
    }

    /// Create a tree with a custom substitution delay.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            nodes: HashMap::new(),
            delay,
        }
    }

    /// Expansion of the node `id` rendered at `depth`.
    pub fn expansion(&self, id: &str, depth: usize) -> Expansion {
        self.nodes
            .get(id)
            .and_then(|node| node.expansion)
            .unwrap_or_else(|| Expansion::initial(depth))
    }

    /// Flip the expansion of `section` and return the new state.
    ///
    /// Expanding a placeholder node schedules its substitution.
    pub fn toggle(&mut self, section: &Section, depth: usize, now: Instant) -> Expansion {
        let next = self.expansion(&section.id, depth).toggled();
        self.nodes.entry(section.id.clone()).or_default().expansion = Some(next);
        if next.is_expanded() {
            self.schedule(section, now);
        }
        next
    }

    /// Schedule substitutions for every visible expanded placeholder node.
    ///
    /// Walks `section` and the subsections of expanded nodes, so nodes that
    /// start expanded behave as if they had just been expanded.
    pub fn activate(&mut self, section: &Section, depth: usize, now: Instant) {
        if !self.expansion(&section.id, depth).is_expanded() {
            return;
        }
        self.schedule(section, now);
        for child in &section.subsections {
            self.activate(child, depth + 1, now);
        }
    }

    /// Apply substitutions that are due, returning the affected ids.
    pub fn poll(&mut self, now: Instant) -> Vec<String> {
        let mut applied = Vec::new();
        for (id, node) in &mut self.nodes {
            let is_due = matches!(
                &node.substitution,
                Some(Substitution::Pending { due, .. }) if *due <= now
            );
            if is_due && let Some(Substitution::Pending { content, .. }) = node.substitution.take() {
                node.substitution = Some(Substitution::Applied(content));
                applied.push(id.clone());
            }
        }
        if !applied.is_empty() {
            tracing::debug!(ids = ?applied, "Applied placeholder substitutions");
        }
        applied
    }

    /// Earliest pending substitution, for timer scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.nodes
            .values()
            .filter_map(|node| match &node.substitution {
                Some(Substitution::Pending { due, .. }) => Some(*due),
                _ => None,
            })
            .min()
    }

    /// Substituted content of node `id`, once applied.
    pub fn applied_content(&self, id: &str) -> Option<&str> {
        match self.nodes.get(id).and_then(|n| n.substitution.as_ref()) {
            Some(Substitution::Applied(content)) => Some(content),
            _ => None,
        }
    }

    /// Content currently shown for `section`.
    pub fn displayed_content<'a>(&'a self, section: &'a Section) -> Option<&'a str> {
        self.applied_content(&section.id)
            .or(section.content.as_deref())
    }

    /// Render `section` and its subsections, starting at `depth`.
    ///
    /// Each node's toggle is a link to `toggle_href(id)`.
    pub fn render(
        &self,
        section: &Section,
        depth: usize,
        toggle_href: &dyn Fn(&str) -> String,
    ) -> String {
        let mut html = String::with_capacity(1024);
        self.render_node(&mut html, section, depth, toggle_href);
        html
    }

    fn render_node(
        &self,
        html: &mut String,
        section: &Section,
        depth: usize,
        toggle_href: &dyn Fn(&str) -> String,
    ) {
        let expanded = self.expansion(&section.id, depth).is_expanded();
        let heading = (depth + 2).min(6);

        let _ = writeln!(
            html,
            "<section class=\"doc-section depth-{depth}\" id=\"{}\" data-expanded=\"{expanded}\">",
            escape(&section.id)
        );
        let _ = writeln!(
            html,
            "<a class=\"section-toggle\" href=\"{}\" data-toggle=\"{}\" aria-expanded=\"{expanded}\">{}</a>",
            escape(&toggle_href(&section.id)),
            escape(&section.id),
            if expanded { "&#9662;" } else { "&#9656;" }
        );
        let _ = writeln!(html, "<h{heading}>{}</h{heading}>", escape(&section.title));
        if let Some(description) = &section.description {
            let _ = writeln!(
                html,
                "<p class=\"section-description\">{}</p>",
                escape(description)
            );
        }

        if expanded {
            if let Some(content) = self.displayed_content(section) {
                html.push_str("<div class=\"section-content\">\n");
                html.push_str(&render_markdown(content));
                html.push_str("</div>\n");
            }
            for child in &section.subsections {
                self.render_node(html, child, depth + 1, toggle_href);
            }
        }

        html.push_str("</section>\n");
    }

    fn schedule(&mut self, section: &Section, now: Instant) {
        if section.content.as_deref() != Some(LAZY_CONTENT_PLACEHOLDER) {
            return;
        }
        let node = self.nodes.entry(section.id.clone()).or_default();
        if node.substitution.is_none() {
            tracing::debug!(id = %section.id, "Scheduling placeholder substitution");
            node.substitution = Some(Substitution::Pending {
                due: now + self.delay,
                content: substituted_content(section),
            });
        }
    }
}

/// Content shown in place of the placeholder.
fn substituted_content(section: &Section) -> String {
    format!(
        "## {title}\n\n{description}\n\nThis section covers everything you need to know about {title}.",
        title = section.title,
        description = section.description.as_deref().unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lazy(id: &str) -> Section {
        Section::new(id, "Plugins", LAZY_CONTENT_PLACEHOLDER).with_description("Extend it")
    }

    fn anchor(id: &str) -> String {
        format!("#{id}")
    }

    fn tree_fixture() -> Section {
        Section::new("root", "Root", "root body")
            .with_subsection(
                Section::new("a", "A", "a body").with_subsection(Section::new("a1", "A1", "a1 body")),
            )
            .with_subsection(Section::new("b", "B", "b body"))
    }

    #[test]
    fn test_initial_expansion_by_depth() {
        let tree = SectionTree::new();

        assert_eq!(tree.expansion("x", 0), Expansion::Expanded);
        assert_eq!(tree.expansion("x", 1), Expansion::Expanded);
        assert_eq!(tree.expansion("x", 2), Expansion::Collapsed);
        assert_eq!(tree.expansion("x", 5), Expansion::Collapsed);
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut tree = SectionTree::new();
        let section = Section::new("a", "A", "");
        let now = Instant::now();

        assert_eq!(tree.toggle(&section, 1, now), Expansion::Collapsed);
        assert_eq!(tree.toggle(&section, 1, now), Expansion::Expanded);
        assert_eq!(tree.toggle(&section, 3, now), Expansion::Collapsed);
    }

    #[test]
    fn test_toggle_does_not_affect_siblings_or_descendants() {
        let mut tree = SectionTree::new();
        let root = tree_fixture();
        let now = Instant::now();

        // Expand the grandchild first, then collapse and re-expand its parent
        tree.toggle(&root.subsections[0].subsections[0], 2, now);
        tree.toggle(&root.subsections[0], 1, now);
        tree.toggle(&root.subsections[0], 1, now);

        assert_eq!(tree.expansion("a1", 2), Expansion::Expanded);
        assert_eq!(tree.expansion("b", 1), Expansion::Expanded);
        assert_eq!(tree.expansion("root", 0), Expansion::Expanded);
    }

    #[test]
    fn test_render_hides_collapsed_content() {
        let tree = SectionTree::new();

        let html = tree.render(&tree_fixture(), 0, &anchor);

        assert!(html.contains("a body"));
        assert!(html.contains("b body"));
        // a1 renders at depth 2: header only
        assert!(html.contains("<h4>A1</h4>"));
        assert!(!html.contains("a1 body"));
    }

    #[test]
    fn test_render_collapsed_parent_hides_children() {
        let mut tree = SectionTree::new();
        let root = tree_fixture();
        tree.toggle(&root.subsections[0], 1, Instant::now());

        let html = tree.render(&root, 0, &anchor);

        assert!(html.contains("href=\"#a\" data-toggle=\"a\" aria-expanded=\"false\""));
        assert!(!html.contains("A1"));
    }

    #[test]
    fn test_placeholder_replaced_after_delay() {
        let mut tree = SectionTree::new();
        let section = lazy("plugins");
        let start = Instant::now();

        // Depth 2 starts collapsed; expanding schedules the substitution
        tree.toggle(&section, 2, start);
        assert_eq!(tree.displayed_content(&section), Some(LAZY_CONTENT_PLACEHOLDER));
        assert_eq!(tree.next_deadline(), Some(start + SUBSTITUTION_DELAY));

        assert!(tree.poll(start + Duration::from_millis(50)).is_empty());
        assert_eq!(tree.displayed_content(&section), Some(LAZY_CONTENT_PLACEHOLDER));

        assert_eq!(tree.poll(start + SUBSTITUTION_DELAY), vec!["plugins".to_owned()]);
        let content = tree.displayed_content(&section).unwrap();
        assert!(content.starts_with("## Plugins\n\nExtend it"));
        assert_ne!(content, LAZY_CONTENT_PLACEHOLDER);
        assert_eq!(tree.next_deadline(), None);
    }

    #[test]
    fn test_placeholder_collapsed_node_is_not_scheduled() {
        let mut tree = SectionTree::new();
        let section = lazy("plugins");
        let now = Instant::now();

        tree.activate(&section, 2, now);

        assert_eq!(tree.next_deadline(), None);
    }

    #[test]
    fn test_activate_schedules_initially_expanded_placeholder() {
        let mut tree = SectionTree::new();
        let parent = Section::new("parent", "Parent", "").with_subsection(lazy("plugins"));
        let start = Instant::now();

        tree.activate(&parent, 0, start);
        tree.poll(start + SUBSTITUTION_DELAY);

        let html = tree.render(&parent, 0, &anchor);
        assert!(html.contains("everything you need to know about Plugins"));
        assert!(!html.contains(LAZY_CONTENT_PLACEHOLDER));
    }

    #[test]
    fn test_root_placeholder_replaced_after_activate() {
        let mut tree = SectionTree::new();
        let root = lazy("plugins");
        let start = Instant::now();

        tree.activate(&root, 0, start);
        assert_eq!(tree.applied_content("plugins"), None);

        tree.poll(start + SUBSTITUTION_DELAY);
        assert!(
            tree.applied_content("plugins")
                .unwrap()
                .contains("everything you need to know about Plugins")
        );
        assert!(!tree.render(&root, 0, &anchor).contains(LAZY_CONTENT_PLACEHOLDER));
    }

    #[test]
    fn test_regular_content_never_substituted() {
        let mut tree = SectionTree::new();
        let section = Section::new("a", "A", "plain");
        let now = Instant::now();

        tree.toggle(&section, 2, now);
        tree.poll(now + Duration::from_secs(1));

        assert_eq!(tree.displayed_content(&section), Some("plain"));
    }
}
