// taskboard - Shared kanban board with a remote snapshot and a local cache

pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod persist;
pub mod remote;
pub mod store;

// Re-export main types for convenience
pub use codec::{BoardDocument, export_document, import_document, parse_snapshot};
pub use config::Config;
pub use error::BoardError;
pub use models::{Assignee, Status, Task, now_ms};
pub use persist::{BootstrapSource, LocalCache, bootstrap, seed_task};
pub use remote::{HttpRemote, RemoteSnapshot};
pub use store::TaskStore;
