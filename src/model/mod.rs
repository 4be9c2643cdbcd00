pub mod config;
pub mod due_date;
pub mod ids;
pub mod list;
pub mod selection;
pub mod snapshot;
pub mod task;

pub use config::*;
pub use ids::*;
pub use list::*;
pub use selection::*;
pub use snapshot::*;
pub use task::*;
