//! Object types and tree entries

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::address::ContentAddress;

/// Kinds of objects held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// Ordered list of named entries
    Tree,
    /// Raw bytes (file contents or link targets)
    Blob,
    /// Snapshot pointer: a root tree plus its parents
    Commit,
}

impl ObjectType {
    /// Returns the tag used in the object framing
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Tree => "tree",
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a node inside a tree
///
/// This is the closed set of things a tree entry can point at. Adding a
/// variant forces every match over node kinds to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A subtree
    Directory,
    /// A blob without the executable bit
    RegularFile,
    /// A blob with the executable bit
    ExecutableFile,
    /// A blob whose bytes are a link target
    SymbolicLink,
}

impl NodeKind {
    /// Git file mode for this kind
    pub const fn git_mode(&self) -> u32 {
        match self {
            NodeKind::Directory => 0o040000,
            NodeKind::RegularFile => 0o100644,
            NodeKind::ExecutableFile => 0o100755,
            NodeKind::SymbolicLink => 0o120000,
        }
    }

    /// Maps a git file mode back to a node kind
    ///
    /// Gitlinks (`160000`) and any other mode have no node kind.
    pub const fn from_git_mode(mode: u32) -> Option<Self> {
        match mode {
            0o040000 => Some(NodeKind::Directory),
            0o100644 => Some(NodeKind::RegularFile),
            0o100755 => Some(NodeKind::ExecutableFile),
            0o120000 => Some(NodeKind::SymbolicLink),
            _ => None,
        }
    }

    /// The object type this kind of entry points at
    pub const fn object_type(&self) -> ObjectType {
        match self {
            NodeKind::Directory => ObjectType::Tree,
            NodeKind::RegularFile | NodeKind::ExecutableFile | NodeKind::SymbolicLink => {
                ObjectType::Blob
            }
        }
    }

    /// Returns true for subtrees
    pub const fn is_directory(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Directory => write!(f, "Directory"),
            NodeKind::RegularFile => write!(f, "RegularFile"),
            NodeKind::ExecutableFile => write!(f, "ExecutableFile"),
            NodeKind::SymbolicLink => write!(f, "SymbolicLink"),
        }
    }
}

/// A single named child of a tree
///
/// Entries are immutable value data: the name, the kind and the address
/// of the object the entry points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Name of this entry within its parent
    pub name: String,
    /// Kind of node
    pub kind: NodeKind,
    /// Address of the tree or blob
    pub address: ContentAddress,
}

impl TreeEntry {
    /// Creates a new tree entry
    pub fn new(name: impl Into<String>, kind: NodeKind, address: ContentAddress) -> Self {
        Self {
            name: name.into(),
            kind,
            address,
        }
    }

    /// Creates the unnamed entry that stands for a commit's root tree
    pub fn root(address: ContentAddress) -> Self {
        Self {
            name: String::new(),
            kind: NodeKind::Directory,
            address,
        }
    }
}

/// A decoded commit object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Root tree of the snapshot
    pub tree: ContentAddress,
    /// Parent commits, first parent first
    pub parents: Vec<ContentAddress>,
    /// Free-form message
    pub message: String,
}

impl Commit {
    /// Creates a parentless commit
    pub fn new(tree: ContentAddress, message: impl Into<String>) -> Self {
        Self {
            tree,
            parents: Vec::new(),
            message: message.into(),
        }
    }

    /// Adds a parent commit
    pub fn with_parent(mut self, parent: ContentAddress) -> Self {
        self.parents.push(parent);
        self
    }
}

/// Returns true if `name` may appear as a tree entry name
pub fn is_valid_entry_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\0')
}
