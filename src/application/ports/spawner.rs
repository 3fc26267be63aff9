//! Background job spawning port interface

use std::future::Future;
use std::pin::Pin;

/// A detached unit of work
pub type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Port for running work outside the request/response cycle.
///
/// Callers hand the job over and never wait for it.
pub trait JobSpawner: Send + Sync {
    fn spawn(&self, job: Job);
}
