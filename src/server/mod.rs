//! HTTP surface: JSON API under `/api` plus the bundled frontend.

pub mod serializers;
pub mod urls;
pub mod views;

use std::sync::Arc;

use crate::llm::client::LlmClient;
use crate::store::DictionaryStore;

/// Process-wide dependencies, built once by `serve` and cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmClient>,
    pub dictionary: Arc<dyn DictionaryStore>,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmClient>, dictionary: Arc<dyn DictionaryStore>) -> Self {
        Self { llm, dictionary }
    }
}
