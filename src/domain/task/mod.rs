//! Task domain module

mod lifecycle;
mod retention;
mod task_id;

pub use lifecycle::{InvalidTaskTransition, Task, TaskStatus, TaskUpdate};
pub use retention::RetentionPolicy;
pub use task_id::TaskId;
