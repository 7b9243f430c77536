//! # Commit View Service
//!
//! This service projects one pinned commit tree onto read-only filesystem
//! operations.
//!
//! ## Philosophy
//!
//! - The view is read-only and pinned to a single commit
//! - Every call is a pure function of the root and the path
//! - Failures are typed results, never panics
//! - A store failure fails one call, not the view
//!
//! ## Operations
//!
//! - `attributes(path)`: Get node metadata
//! - `list_directory(path)`: List child names in store order
//! - `read_link(path)`: Read a symlink target verbatim
//! - `check_access(path)`: Check that a path exists

pub mod attributes;
pub mod config;
pub mod listing;
pub mod operations;
pub mod service;

pub use attributes::{AttributeRecord, FileType};
pub use config::{ConfigError, ViewConfig};
pub use listing::{DirectoryListing, Names};
pub use operations::{CommitFileSystem, ViewError, ViewResult};
pub use service::CommitView;
