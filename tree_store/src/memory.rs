//! In-memory repository
//!
//! Objects are encoded once at build time and decoded on every read, the
//! same way a loose-object store behaves. Nothing is cached after decoding.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::address::ContentAddress;
use crate::codec;
use crate::counter::AtomicCounter;
use crate::object::{is_valid_entry_name, Commit, NodeKind, ObjectType, TreeEntry};
use crate::repository::{Repository, StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredObject {
    object_type: ObjectType,
    body: Vec<u8>,
}

/// Builds the entries of one tree
///
/// Sibling names must be unique; entries keep the order they were
/// inserted in.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    entries: Vec<TreeEntry>,
    names: HashSet<String>,
}

impl TreeBuilder {
    /// Creates an empty tree builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry
    ///
    /// Fails if the name is not a valid entry name or a sibling already
    /// uses it.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        address: ContentAddress,
    ) -> StoreResult<&mut Self> {
        let name = name.into();
        if !is_valid_entry_name(&name) {
            return Err(StoreError::InvalidName(name));
        }
        if !self.names.insert(name.clone()) {
            return Err(StoreError::DuplicateEntry(name));
        }
        self.entries.push(TreeEntry::new(name, kind, address));
        Ok(self)
    }

    /// Entries added so far
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries were added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects objects for a [`MemoryRepository`]
#[derive(Debug, Default)]
pub struct RepositoryBuilder {
    objects: HashMap<ContentAddress, StoredObject>,
}

impl RepositoryBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a blob and returns its address
    pub fn add_blob(&mut self, data: impl AsRef<[u8]>) -> ContentAddress {
        self.add_raw(ObjectType::Blob, data.as_ref().to_vec())
    }

    /// Stores a tree and returns its address
    pub fn add_tree(&mut self, tree: &TreeBuilder) -> ContentAddress {
        self.add_raw(ObjectType::Tree, codec::encode_tree(tree.entries()))
    }

    /// Stores a commit and returns its address
    pub fn add_commit(&mut self, commit: &Commit) -> ContentAddress {
        self.add_raw(ObjectType::Commit, codec::encode_commit(commit))
    }

    /// Stores an already-encoded body without validating it
    pub fn add_raw(&mut self, object_type: ObjectType, body: Vec<u8>) -> ContentAddress {
        let address = ContentAddress::for_object(object_type, &body);
        self.objects
            .entry(address)
            .or_insert(StoredObject { object_type, body });
        address
    }

    /// Freezes the collected objects
    pub fn build(self) -> MemoryRepository {
        MemoryRepository {
            objects: self.objects,
            reads: AtomicCounter::new(0),
        }
    }
}

/// An immutable content-addressed store held in memory
#[derive(Debug)]
pub struct MemoryRepository {
    objects: HashMap<ContentAddress, StoredObject>,
    reads: AtomicCounter,
}

impl MemoryRepository {
    /// Starts a new repository builder
    pub fn builder() -> RepositoryBuilder {
        RepositoryBuilder::new()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns true if an object with this address is stored
    pub fn contains(&self, address: &ContentAddress) -> bool {
        self.objects.contains_key(address)
    }

    /// Number of object reads served so far
    pub fn reads(&self) -> i64 {
        self.reads.value()
    }

    /// Sets the read count back to zero
    pub fn reset_reads(&self) {
        loop {
            let current = self.reads.value();
            if self.reads.compare_and_swap(current, 0) {
                return;
            }
        }
    }

    fn fetch(&self, address: &ContentAddress, expected: ObjectType) -> StoreResult<&[u8]> {
        self.reads.add_and_fetch(1);

        let object = self.objects.get(address).ok_or_else(|| {
            tracing::debug!(address = %address.short(), "object not in store");
            StoreError::ObjectNotFound(*address)
        })?;

        if object.object_type != expected {
            return Err(StoreError::TypeMismatch {
                address: *address,
                expected,
                found: object.object_type,
            });
        }

        tracing::trace!(address = %address.short(), kind = %expected, "read object");
        Ok(&object.body)
    }
}

impl Repository for MemoryRepository {
    fn read_tree(&self, address: &ContentAddress) -> StoreResult<Vec<TreeEntry>> {
        let body = self.fetch(address, ObjectType::Tree)?;
        codec::decode_tree(address, body)
    }

    fn read_blob(&self, address: &ContentAddress) -> StoreResult<Vec<u8>> {
        self.fetch(address, ObjectType::Blob).map(<[u8]>::to_vec)
    }

    fn read_commit(&self, address: &ContentAddress) -> StoreResult<Commit> {
        let body = self.fetch(address, ObjectType::Commit)?;
        codec::decode_commit(address, body)
    }
}
