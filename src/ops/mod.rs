pub mod context_ops;
pub mod search;
pub mod stats;
pub mod task_ops;
