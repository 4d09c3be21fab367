//! Shared application state for the web server.

use std::sync::Arc;

use mindmate_triage::{Catalog, TextClassifier, Triage};

/// Shared state injected into every Axum handler.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub triage: Triage,
}

impl AppState {
    pub fn new(catalog: Catalog, classifier: Arc<dyn TextClassifier>) -> Self {
        let triage = Triage::from_catalog(&catalog, classifier);
        Self { catalog, triage }
    }
}

pub type SharedState = Arc<AppState>;
