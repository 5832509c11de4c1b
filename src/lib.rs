//! tasktable: a local task tracker backed by a single SQLite file.
//!
//! Tasks carry a title, optional description, time estimate and category, one of
//! three priorities and a completion flag. They are browsed through a paginated,
//! case-sensitive substring search and can be exported to CSV.
//!
//! # Example
//!
//! ```no_run
//! use tasktable::{PageRequest, Priority, Store, TaskFields};
//! use std::path::Path;
//!
//! let mut store = Store::open(Path::new("tasks.db")).unwrap();
//!
//! store.add_category("Work").unwrap();
//! let id = store
//!     .add_task(
//!         &TaskFields::new("Write report").with_category("Work").with_priority(Priority::Medium),
//!         1_700_000_000,
//!     )
//!     .unwrap();
//!
//! store.toggle_done(id).unwrap();
//!
//! let page = store.query_page(&PageRequest::new().search("report")).unwrap();
//! assert_eq!(page.total, 1);
//! assert_eq!(page.done, 1);
//! ```

mod storage;
mod store;
mod types;

pub mod board;
pub mod config;
pub mod export;
pub mod query;

// Re-export public API
pub use board::{Board, FormMode, ViewState};
pub use config::Config;
pub use query::{Page, PageRequest};
pub use store::{Store, StoreError};
pub use types::{Category, Priority, Task, TaskFields, ValidationError, format_created};
