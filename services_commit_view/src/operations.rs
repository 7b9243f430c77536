//! Commit view operations
//!
//! This module defines the read-only operations a filesystem dispatcher
//! invokes on a commit view, and the errors they report.

use thiserror::Error;
use tree_store::StoreError;

use crate::attributes::AttributeRecord;
use crate::listing::DirectoryListing;

/// No such file or directory
pub const ENOENT: i32 = 2;
/// I/O error
pub const EIO: i32 = 5;
/// Not a directory
pub const ENOTDIR: i32 = 20;
/// Invalid argument
pub const EINVAL: i32 = 22;

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors that can occur during view operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    /// Nothing exists at the path
    #[error("No such entry: {0}")]
    NoSuchEntry(String),

    /// A directory operation was invoked on something else
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// A link operation was invoked on something else
    #[error("Not a symlink: {0}")]
    NotASymlink(String),

    /// The object store failed or returned a corrupt object
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ViewError {
    /// Converts to an errno code
    ///
    /// `NotASymlink` maps to `EINVAL`, which is what `readlink(2)` reports
    /// for a non-link. Every store failure maps to `EIO`.
    pub fn errno(&self) -> i32 {
        match self {
            ViewError::NoSuchEntry(_) => ENOENT,
            ViewError::NotADirectory(_) => ENOTDIR,
            ViewError::NotASymlink(_) => EINVAL,
            ViewError::Store(_) => EIO,
        }
    }

    /// Returns true if the path simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ViewError::NoSuchEntry(_))
    }
}

impl From<ViewError> for std::io::Error {
    fn from(err: ViewError) -> Self {
        std::io::Error::from_raw_os_error(err.errno())
    }
}

/// Read-only filesystem operations over one pinned commit
///
/// Paths are absolute, `/`-separated and relative to the commit root. They
/// are not normalized: `.` and `..` are looked up as ordinary names.
pub trait CommitFileSystem {
    /// Get node attributes
    ///
    /// The root (empty path or `/`) always reports directory attributes
    /// without touching the store.
    fn attributes(&self, path: &str) -> ViewResult<AttributeRecord>;

    /// List directory contents
    ///
    /// Returns the child names in store order, without `.` and `..`.
    fn list_directory(&self, path: &str) -> ViewResult<DirectoryListing>;

    /// Read a symbolic link
    ///
    /// Returns the stored target bytes verbatim.
    fn read_link(&self, path: &str) -> ViewResult<Vec<u8>>;

    /// Check that a path exists
    ///
    /// Existence is the only check; every caller may read and search.
    fn check_access(&self, path: &str) -> ViewResult<()>;
}
