//! Background execution adapters

mod tokio_spawner;

pub use tokio_spawner::TokioJobSpawner;
