pub mod models;
pub mod queue;
pub mod worker;

pub use models::*;
pub use queue::EmailDispatcher;
pub use worker::EmailWorker;
