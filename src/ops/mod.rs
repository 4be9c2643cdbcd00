pub mod filter;
pub mod id_source;
pub mod list_ops;
pub mod navigate;
pub mod task_ops;
