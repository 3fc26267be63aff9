mod health;
mod index;
mod status;
mod upload;

pub use health::{health_handler, HealthResponse};
pub use index::index_handler;
pub use status::{status_handler, StatusResponse};
pub use upload::{upload_handler, UploadResponse, AUDIO_FIELD};
