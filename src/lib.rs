pub mod cli;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod session;
pub mod store;

pub use io::bridge::{PersistError, PersistOutcome, PersistenceBridge};
pub use io::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use model::{Filter, ListId, Snapshot, Task, TaskId, TaskList, TaskOrder};
pub use session::Session;
pub use store::{Action, Store, Transition};
