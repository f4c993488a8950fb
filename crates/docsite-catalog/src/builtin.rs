//! Static catalog compiled into the binary.

use crate::{Category, Section};

/// Content marking a section whose body is filled in when first expanded.
pub const LAZY_CONTENT_PLACEHOLDER: &str = "Loading content...";

/// Section opened first when no other is requested.
pub const DEFAULT_SECTION_ID: &str = "installation";

/// Build the builtin category tree.
pub(crate) fn categories() -> Vec<Category> {
    vec![
        Category::new("getting-started", "Getting Started")
            .with_icon("rocket")
            .with_section(
                Section::new(
                    "installation",
                    "Installation",
                    "## Installation\n\n\
                     Install the toolkit with your package manager:\n\n\
                     ```sh\ncargo install devkit\n```\n\n\
                     Verify the installation with `devkit --version`.",
                )
                .with_description("Install the toolkit on your machine"),
            )
            .with_section(
                Section::new(
                    "quick-start",
                    "Quick Start",
                    "## Quick Start\n\n\
                     Create a new project and start the development server:\n\n\
                     ```sh\ndevkit new my-app\ncd my-app\ndevkit dev\n```\n\n\
                     Open the printed URL in your browser.",
                )
                .with_description("Build your first project in five minutes"),
            ),
        Category::new("core-concepts", "Core Concepts")
            .with_icon("book")
            .with_section(
                Section::new(
                    "architecture",
                    "Architecture",
                    "## Architecture\n\n\
                     A project is made of a build pipeline, a plugin host and a \
                     development server. Each part is described below.",
                )
                .with_description("How the pieces fit together")
                .with_subsection(
                    Section::new(
                        "build-pipeline",
                        "Build Pipeline",
                        "The build pipeline compiles sources in dependency order and \
                         caches every intermediate artifact.",
                    )
                    .with_description("From sources to artifacts"),
                )
                .with_subsection(
                    Section::new("plugin-host", "Plugin Host", LAZY_CONTENT_PLACEHOLDER)
                        .with_description("Extend the toolkit with your own plugins")
                        .with_subsection(
                            Section::new(
                                "plugin-lifecycle",
                                "Plugin Lifecycle",
                                "Plugins are loaded at startup, initialized in \
                                 registration order and shut down in reverse order.",
                            )
                            .with_description("Load, initialize, shut down"),
                        ),
                ),
            )
            .with_section(
                Section::new(
                    "configuration",
                    "Configuration",
                    "## Configuration\n\n\
                     Settings live in `devkit.toml` at the project root. Every \
                     value can be overridden with an environment variable.",
                )
                .with_description("Project settings and overrides"),
            ),
        Category::new("api-reference", "API Reference")
            .with_icon("code")
            .with_section(
                Section::new(
                    "client-api",
                    "Client API",
                    "## Client API\n\n\
                     The client library exposes typed requests for every \
                     server endpoint.",
                )
                .with_description("Typed requests from your application"),
            )
            .with_section(
                Section::new(
                    "server-api",
                    "Server API",
                    "## Server API\n\n\
                     All endpoints accept and return JSON. Non-2xx responses \
                     carry an `error` field.",
                )
                .with_description("HTTP endpoints and payloads"),
            ),
    ]
}
