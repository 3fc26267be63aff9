//! Upload staging adapters

mod local;

pub use local::LocalUploadStaging;
