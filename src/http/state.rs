use std::sync::Arc;

use crate::application::TranscriptionService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranscriptionService>,
    /// Largest accepted request body on `/upload`
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(service: Arc<TranscriptionService>, max_upload_bytes: usize) -> Self {
        Self {
            service,
            max_upload_bytes,
        }
    }
}
