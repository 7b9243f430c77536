//! # Tree Store
//!
//! This crate defines the immutable, content-addressed object model that
//! commit views are projected from.
//!
//! ## Philosophy
//!
//! - **Content is identity**: an object's address is the digest of its bytes
//! - **Objects never change**: a pinned commit always yields the same tree
//! - **Reads are explicit**: children are fetched by address when asked for,
//!   never loaded eagerly
//!
//! ## Design
//!
//! - **ContentAddress**: SHA-256 of the framed object body
//! - **NodeKind**: closed set of tree entry kinds (directory, file,
//!   executable, symlink)
//! - **Repository**: the read interface every consumer goes through
//! - **MemoryRepository**: a complete in-memory store for embedding and tests

pub mod address;
pub mod codec;
pub mod counter;
pub mod memory;
pub mod object;
pub mod repository;

pub use address::{AddressParseError, ContentAddress, ADDRESS_LEN};
pub use counter::AtomicCounter;
pub use memory::{MemoryRepository, RepositoryBuilder, TreeBuilder};
pub use object::{is_valid_entry_name, Commit, NodeKind, ObjectType, TreeEntry};
pub use repository::{Repository, StoreError, StoreResult};
