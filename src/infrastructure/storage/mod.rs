pub mod sqlite_queue;

pub use sqlite_queue::{init_schema, SqliteQueueStore};
