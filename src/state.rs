//! Shared application state for all routes. Read-only after startup.

use crate::backend::Backend;
use crate::config::ResolvedModel;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub model: Arc<ResolvedModel>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, model: ResolvedModel) -> Self {
        Self {
            backend,
            model: Arc::new(model),
        }
    }
}
