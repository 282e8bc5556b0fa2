//! Underlying-logger side of the axe front-end.
//!
//! Defines the console contract, the per-logger forwarding table, a
//! `tracing` adapter, an in-memory recording console, and global subscriber
//! setup.

pub mod console;
pub mod logger;
pub mod memory;
pub mod method_table;
pub mod tracing_console;

pub use console::{Console, FieldShape};
pub use logger::init_logger;
pub use memory::{Call, MemoryConsole};
pub use method_table::MethodTable;
pub use tracing_console::TracingConsole;
