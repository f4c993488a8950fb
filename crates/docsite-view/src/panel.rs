//! Content panel: one fetched section in one of four states.

use std::fmt::Write;

use docsite_catalog::{Section, SectionContent};
use docsite_client::FetchError;
use docsite_query::QueryState;

use crate::html::{escape, render_markdown};

/// What the content panel shows.
///
/// Built from a query state in priority order: loading, error, loaded,
/// empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentPanel {
    /// Request in flight.
    Loading,
    /// Last request failed; carries the error message.
    Error(String),
    /// Section content is available.
    Loaded(SectionContent),
    /// Nothing selected or nothing found: welcome state.
    Empty,
}

impl ContentPanel {
    /// Derive the panel state from a section query.
    pub fn from_query(state: &QueryState<SectionContent, FetchError>) -> Self {
        if state.is_loading {
            Self::Loading
        } else if let Some(err) = &state.error {
            Self::Error(err.to_string())
        } else if let Some(content) = &state.data {
            Self::Loaded(content.clone())
        } else {
            Self::Empty
        }
    }

    /// Render the panel.
    ///
    /// `section` supplies the title and description of loaded content when
    /// the section is known to the catalog.
    pub fn render(&self, section: Option<&Section>) -> String {
        let mut html = String::with_capacity(1024);
        html.push_str("<div class=\"content-panel\">\n");

        match self {
            Self::Loading => {
                html.push_str(
                    "<div class=\"panel-loading\" role=\"status\">\
                     <span class=\"spinner\"></span>\
                     <p>Loading documentation...</p></div>\n",
                );
            }
            Self::Error(message) => {
                html.push_str("<div class=\"panel-error\" role=\"alert\">\n");
                html.push_str("<h2>Error Loading Content</h2>\n");
                html.push_str(
                    "<p>There was an error loading this section. Please try again later.</p>\n",
                );
                let _ = writeln!(html, "<!-- {} -->", escape(message));
                html.push_str("</div>\n");
            }
            Self::Loaded(content) => {
                let _ = writeln!(
                    html,
                    "<article class=\"panel-article\" data-section=\"{}\">",
                    escape(&content.id)
                );
                if let Some(section) = section {
                    let _ = writeln!(html, "<h1>{}</h1>", escape(&section.title));
                    if let Some(description) = &section.description {
                        let _ = writeln!(html, "<p class=\"lead\">{}</p>", escape(description));
                    }
                }
                html.push_str(&render_markdown(&content.content));
                html.push_str("</article>\n");
            }
            Self::Empty => {
                html.push_str("<div class=\"panel-welcome\">\n");
                html.push_str("<h1>Welcome to the Documentation</h1>\n");
                html.push_str(
                    "<p>Select a section from the sidebar to get started.</p>\n",
                );
                html.push_str("</div>\n");
            }
        }

        html.push_str("</div>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Instant;

    fn content() -> SectionContent {
        SectionContent {
            id: "intro".to_owned(),
            content: "Hello **world**".to_owned(),
        }
    }

    fn not_found() -> FetchError {
        FetchError::Status {
            status: 404,
            url: "/section/intro".to_owned(),
        }
    }

    #[test]
    fn test_loading_takes_priority() {
        let state = QueryState {
            data: Some(content()),
            error: Some(not_found()),
            is_loading: true,
            updated_at: None,
        };

        assert_eq!(ContentPanel::from_query(&state), ContentPanel::Loading);
    }

    #[test]
    fn test_error_before_data() {
        let state = QueryState {
            data: Some(content()),
            error: Some(not_found()),
            is_loading: false,
            updated_at: None,
        };

        assert_eq!(
            ContentPanel::from_query(&state),
            ContentPanel::Error("HTTP 404 for /section/intro".to_owned())
        );
    }

    #[test]
    fn test_loaded_and_empty() {
        let loaded = QueryState::ready(content(), Instant::now());

        assert_eq!(
            ContentPanel::from_query(&loaded),
            ContentPanel::Loaded(content())
        );
        assert_eq!(ContentPanel::from_query(&QueryState::idle()), ContentPanel::Empty);
    }

    #[test]
    fn test_render_states() {
        assert!(ContentPanel::Loading.render(None).contains("Loading documentation..."));
        assert!(
            ContentPanel::Error("boom".to_owned())
                .render(None)
                .contains("Error Loading Content")
        );
        assert!(ContentPanel::Empty.render(None).contains("Welcome to the Documentation"));
    }

    #[test]
    fn test_render_loaded_with_section_header() {
        let section = Section::new("intro", "Introduction", "").with_description("Start here");

        let html = ContentPanel::Loaded(content()).render(Some(&section));

        assert!(html.contains("<h1>Introduction</h1>"));
        assert!(html.contains("<p class=\"lead\">Start here</p>"));
        assert!(html.contains("<strong>world</strong>"));
    }
}
