//! HTTP request handlers.

pub(crate) mod docs_page;
pub(crate) mod documentation;
