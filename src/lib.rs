pub mod config;
pub mod error;
pub mod store;
pub mod worker;

pub use store::{get_instance, Key, SharedStore};
pub use worker::{run_workers, WorkerReport};
