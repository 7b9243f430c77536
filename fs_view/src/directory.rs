//! Directory view and entry lookup
//!
//! A directory is one tree object read from the store. Its entries keep the
//! order the store returned them in; lookups go through a name index that is
//! built once per load.

use std::collections::HashMap;
use tree_store::{ContentAddress, Repository, StoreError, StoreResult, TreeEntry};

/// A loaded directory
///
/// Holds the entries of a single tree. Subdirectories are not loaded; their
/// entries only carry the address to fetch them by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    /// The address of this directory's tree
    pub address: ContentAddress,
    /// Entries in store order
    entries: Vec<TreeEntry>,
    /// Name -> position in `entries`
    index: HashMap<String, usize>,
}

impl DirectoryView {
    /// Reads the tree at `address` from the repository
    pub fn load<R: Repository + ?Sized>(repo: &R, address: ContentAddress) -> StoreResult<Self> {
        let entries = repo.read_tree(&address)?;
        Self::from_entries(address, entries)
    }

    /// Builds a view from entries already read from the store
    ///
    /// Sibling names are unique in a well-formed tree. A tree that repeats a
    /// name is rejected as corrupt rather than resolved to either sibling.
    pub fn from_entries(address: ContentAddress, entries: Vec<TreeEntry>) -> StoreResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), position).is_some() {
                tracing::warn!(
                    tree = %address.short(),
                    name = %entry.name,
                    "tree repeats an entry name"
                );
                return Err(StoreError::corrupt(
                    address,
                    format!("duplicate entry name {:?}", entry.name),
                ));
            }
        }

        Ok(Self {
            address,
            entries,
            index,
        })
    }

    /// Gets an entry by name
    pub fn get_entry(&self, name: &str) -> Option<&TreeEntry> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    /// Lists all entries in store order
    pub fn list_entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Iterates over entry names in store order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Counts the number of entries
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Consumes the view, returning its entries
    pub fn into_entries(self) -> Vec<TreeEntry> {
        self.entries
    }
}
