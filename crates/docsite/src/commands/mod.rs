//! CLI command implementations.

pub(crate) mod categories;
pub(crate) mod search;
pub(crate) mod serve;
pub(crate) mod show;

pub(crate) use categories::CategoriesArgs;
pub(crate) use search::SearchArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use show::ShowArgs;

use docsite_client::{ClientConfig, DocsClient, StaleTimes};
use docsite_config::Config;

/// Build an API client from the loaded configuration.
pub(crate) fn client_from_config(config: &Config) -> DocsClient {
    let client_config = ClientConfig {
        base_url: config.api.base_url.clone(),
        timeout: config.api.timeout(),
        stale_times: StaleTimes {
            categories: config.cache.categories_stale(),
            section: config.cache.section_stale(),
            search: config.cache.search_stale(),
        },
    };
    tracing::info!(base_url = %client_config.base_url, "Using documentation API");
    DocsClient::new(&client_config)
}
