//! The repository interface
//!
//! A repository hands out immutable objects by content address. Views and
//! resolvers only ever talk to the store through this trait, so any backing
//! (in-memory, on-disk, remote) can sit behind them.

use std::sync::Arc;
use thiserror::Error;

use crate::address::ContentAddress;
use crate::object::{Commit, ObjectType, TreeEntry};

/// Result type for store reads
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a repository
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No object with this address exists
    #[error("object {0} not found")]
    ObjectNotFound(ContentAddress),

    /// The object exists but has a different type than requested
    #[error("object {address} is a {found}, expected a {expected}")]
    TypeMismatch {
        address: ContentAddress,
        expected: ObjectType,
        found: ObjectType,
    },

    /// The object's bytes could not be decoded
    #[error("corrupt object {address}: {reason}")]
    CorruptObject {
        address: ContentAddress,
        reason: String,
    },

    /// Two siblings with the same name were added to one tree
    #[error("duplicate entry name: {0}")]
    DuplicateEntry(String),

    /// An entry name that cannot appear in a tree
    #[error("invalid entry name: {0:?}")]
    InvalidName(String),

    /// The backing store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Builds a `CorruptObject` error
    pub fn corrupt(address: ContentAddress, reason: impl Into<String>) -> Self {
        StoreError::CorruptObject {
            address,
            reason: reason.into(),
        }
    }
}

/// Read access to an immutable object store
///
/// Implementations may cache as they see fit; callers never assume that two
/// reads of the same address share storage, only that they return equal data.
pub trait Repository {
    /// Returns the entries of a tree, in stored order
    fn read_tree(&self, address: &ContentAddress) -> StoreResult<Vec<TreeEntry>>;

    /// Returns the bytes of a blob
    fn read_blob(&self, address: &ContentAddress) -> StoreResult<Vec<u8>>;

    /// Returns a decoded commit
    fn read_commit(&self, address: &ContentAddress) -> StoreResult<Commit>;
}

impl<R: Repository + ?Sized> Repository for &R {
    fn read_tree(&self, address: &ContentAddress) -> StoreResult<Vec<TreeEntry>> {
        (**self).read_tree(address)
    }

    fn read_blob(&self, address: &ContentAddress) -> StoreResult<Vec<u8>> {
        (**self).read_blob(address)
    }

    fn read_commit(&self, address: &ContentAddress) -> StoreResult<Commit> {
        (**self).read_commit(address)
    }
}

impl<R: Repository + ?Sized> Repository for Arc<R> {
    fn read_tree(&self, address: &ContentAddress) -> StoreResult<Vec<TreeEntry>> {
        (**self).read_tree(address)
    }

    fn read_blob(&self, address: &ContentAddress) -> StoreResult<Vec<u8>> {
        (**self).read_blob(address)
    }

    fn read_commit(&self, address: &ContentAddress) -> StoreResult<Commit> {
        (**self).read_commit(address)
    }
}
