//! Directory listings

use fs_view::DirectoryView;
use tree_store::{ContentAddress, TreeEntry};

/// The children of one directory, in store order
///
/// Names are produced on demand and every call to [`names`](Self::names)
/// starts over from the first entry. `.` and `..` are not included; use
/// [`with_dot_entries`](Self::with_dot_entries) where the caller's
/// convention needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    directory: DirectoryView,
}

impl DirectoryListing {
    pub(crate) fn new(directory: DirectoryView) -> Self {
        Self { directory }
    }

    /// Address of the listed tree
    pub fn address(&self) -> ContentAddress {
        self.directory.address
    }

    /// Child names, in store order
    pub fn names(&self) -> Names<'_> {
        Names {
            inner: self.directory.list_entries().iter(),
        }
    }

    /// Child names preceded by `.` and `..`
    pub fn with_dot_entries(&self) -> impl Iterator<Item = &str> + '_ {
        [".", ".."].into_iter().chain(self.names())
    }

    /// Child entries, in store order
    pub fn iter(&self) -> std::slice::Iter<'_, TreeEntry> {
        self.directory.list_entries().iter()
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.directory.count()
    }

    /// Returns true for an empty directory
    pub fn is_empty(&self) -> bool {
        self.directory.count() == 0
    }

    /// Returns true if a child with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.directory.get_entry(name).is_some()
    }
}

impl<'a> IntoIterator for &'a DirectoryListing {
    type Item = &'a str;
    type IntoIter = Names<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.names()
    }
}

/// Iterator over the names in a [`DirectoryListing`]
#[derive(Debug, Clone)]
pub struct Names<'a> {
    inner: std::slice::Iter<'a, TreeEntry>,
}

impl<'a> Iterator for Names<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.name.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Names<'_> {}
