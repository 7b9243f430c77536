//! Path resolution
//!
//! Resolution walks one directory level per component, starting at the
//! pinned root. Each component is looked up among the immediate children of
//! the current directory only; a name is never searched for anywhere else in
//! the tree, since names are unique per directory and not globally.

use crate::directory::DirectoryView;
use crate::path::PathResolver;
use tree_store::{NodeKind, Repository, StoreResult, TreeEntry};

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    /// A node exists at the path
    Found {
        /// The resolved node
        node: TreeEntry,
        /// The directory holding the node; `None` for the root itself
        parent: Option<DirectoryView>,
    },
    /// No node exists at the path
    NotFound,
}

impl ResolvedPath {
    /// Returns true if a node was found
    pub fn is_found(&self) -> bool {
        matches!(self, ResolvedPath::Found { .. })
    }

    /// Returns the resolved node, if any
    pub fn node(&self) -> Option<&TreeEntry> {
        match self {
            ResolvedPath::Found { node, .. } => Some(node),
            ResolvedPath::NotFound => None,
        }
    }

    /// Consumes the result, returning the resolved node, if any
    pub fn into_node(self) -> Option<TreeEntry> {
        match self {
            ResolvedPath::Found { node, .. } => Some(node),
            ResolvedPath::NotFound => None,
        }
    }
}

/// Walks component sequences against a tree root
///
/// Holds only a borrowed repository; every call is independent and reads
/// exactly the directories on the walked path.
pub struct TreeResolver<'r, R: ?Sized> {
    repo: &'r R,
}

impl<'r, R: Repository + ?Sized> TreeResolver<'r, R> {
    /// Creates a resolver reading from `repo`
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    /// Splits `path` and resolves it from `root`
    pub fn resolve_path(&self, root: &TreeEntry, path: &str) -> StoreResult<ResolvedPath> {
        let components = PathResolver::split_path(path);
        self.resolve(root, &components)
    }

    /// Resolves a component sequence from `root`
    ///
    /// An empty sequence resolves to the root. A missing component, or a
    /// component that would have to descend through a non-directory, yields
    /// `NotFound`. Store failures are returned as errors.
    pub fn resolve(&self, root: &TreeEntry, components: &[&str]) -> StoreResult<ResolvedPath> {
        let Some((last, intermediate)) = components.split_last() else {
            return Ok(ResolvedPath::Found {
                node: root.clone(),
                parent: None,
            });
        };

        let mut current = match self.descend(root)? {
            Some(dir) => dir,
            None => return Ok(ResolvedPath::NotFound),
        };

        for (depth, component) in intermediate.iter().enumerate() {
            let Some(entry) = current.get_entry(component) else {
                tracing::debug!(component = %component, depth, "component not found");
                return Ok(ResolvedPath::NotFound);
            };

            tracing::trace!(component = %component, depth, kind = %entry.kind, "descending");
            let next = entry.clone();
            current = match self.descend(&next)? {
                Some(dir) => dir,
                None => {
                    tracing::debug!(component = %component, depth, "cannot descend through non-directory");
                    return Ok(ResolvedPath::NotFound);
                }
            };
        }

        let found = current.get_entry(last).cloned();
        match found {
            Some(node) => Ok(ResolvedPath::Found {
                node,
                parent: Some(current),
            }),
            None => {
                tracing::debug!(component = %last, depth = intermediate.len(), "component not found");
                Ok(ResolvedPath::NotFound)
            }
        }
    }

    /// Loads the directory behind `entry`, or `None` if it is not one
    fn descend(&self, entry: &TreeEntry) -> StoreResult<Option<DirectoryView>> {
        match entry.kind {
            NodeKind::Directory => DirectoryView::load(self.repo, entry.address).map(Some),
            NodeKind::RegularFile | NodeKind::ExecutableFile | NodeKind::SymbolicLink => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_store::{
        Commit, ContentAddress, MemoryRepository, ObjectType, StoreError, TreeBuilder,
    };

    /// /README, /src/main, /a/shared/file1, /b/shared/file2, /link
    fn fixture() -> (MemoryRepository, TreeEntry) {
        let mut builder = MemoryRepository::builder();
        let hi = builder.add_blob("hi");
        let main = builder.add_blob("fn main() {}");
        let target = builder.add_blob("../x");

        let mut src = TreeBuilder::new();
        src.insert("main", NodeKind::RegularFile, main).unwrap();
        let src = builder.add_tree(&src);

        let mut shared_a = TreeBuilder::new();
        shared_a.insert("file1", NodeKind::RegularFile, hi).unwrap();
        let shared_a = builder.add_tree(&shared_a);
        let mut a = TreeBuilder::new();
        a.insert("shared", NodeKind::Directory, shared_a).unwrap();
        let a = builder.add_tree(&a);

        let mut shared_b = TreeBuilder::new();
        shared_b.insert("file2", NodeKind::RegularFile, hi).unwrap();
        let shared_b = builder.add_tree(&shared_b);
        let mut b = TreeBuilder::new();
        b.insert("shared", NodeKind::Directory, shared_b).unwrap();
        let b = builder.add_tree(&b);

        let mut root = TreeBuilder::new();
        root.insert("README", NodeKind::RegularFile, hi).unwrap();
        root.insert("src", NodeKind::Directory, src).unwrap();
        root.insert("a", NodeKind::Directory, a).unwrap();
        root.insert("b", NodeKind::Directory, b).unwrap();
        root.insert("link", NodeKind::SymbolicLink, target).unwrap();
        let root = builder.add_tree(&root);
        builder.add_commit(&Commit::new(root, "fixture"));

        (builder.build(), TreeEntry::root(root))
    }

    #[test]
    fn test_empty_components_resolve_to_root() {
        let (repo, root) = fixture();
        let resolver = TreeResolver::new(&repo);

        let resolved = resolver.resolve(&root, &[]).unwrap();
        assert_eq!(
            resolved,
            ResolvedPath::Found {
                node: root.clone(),
                parent: None
            }
        );
        assert_eq!(repo.reads(), 0);
    }

    #[test]
    fn test_resolve_file_in_root() {
        let (repo, root) = fixture();
        let resolver = TreeResolver::new(&repo);

        let resolved = resolver.resolve_path(&root, "/README").unwrap();
        let node = resolved.node().unwrap();
        assert_eq!(node.name, "README");
        assert_eq!(node.kind, NodeKind::RegularFile);
    }

    #[test]
    fn test_found_carries_containing_directory() {
        let (repo, root) = fixture();
        let resolver = TreeResolver::new(&repo);

        match resolver.resolve_path(&root, "/src/main").unwrap() {
            ResolvedPath::Found { node, parent } => {
                let parent = parent.unwrap();
                assert_eq!(node.name, "main");
                assert_eq!(parent.names().collect::<Vec<_>>(), vec!["main"]);
            }
            ResolvedPath::NotFound => panic!("expected /src/main to resolve"),
        }
    }

    #[test]
    fn test_last_component_may_be_any_kind() {
        let (repo, root) = fixture();
        let resolver = TreeResolver::new(&repo);

        let src = resolver.resolve_path(&root, "/src").unwrap();
        assert_eq!(src.node().unwrap().kind, NodeKind::Directory);

        let link = resolver.resolve_path(&root, "/link").unwrap();
        assert_eq!(link.node().unwrap().kind, NodeKind::SymbolicLink);
    }

    #[test]
    fn test_missing_component() {
        let (repo, root) = fixture();
        let resolver = TreeResolver::new(&repo);

        assert_eq!(
            resolver.resolve_path(&root, "/missing").unwrap(),
            ResolvedPath::NotFound
        );
        assert_eq!(
            resolver.resolve_path(&root, "/src/missing").unwrap(),
            ResolvedPath::NotFound
        );
    }

    #[test]
    fn test_cannot_descend_through_file() {
        let (repo, root) = fixture();
        let resolver = TreeResolver::new(&repo);

        assert_eq!(
            resolver.resolve_path(&root, "/README/anything").unwrap(),
            ResolvedPath::NotFound
        );
        assert_eq!(
            resolver.resolve_path(&root, "/link/x").unwrap(),
            ResolvedPath::NotFound
        );
    }

    #[test]
    fn test_same_name_at_different_paths() {
        let (repo, root) = fixture();
        let resolver = TreeResolver::new(&repo);

        let a = resolver.resolve_path(&root, "/a/shared").unwrap().into_node().unwrap();
        let b = resolver.resolve_path(&root, "/b/shared").unwrap().into_node().unwrap();
        assert_ne!(a.address, b.address);

        let a_dir = DirectoryView::load(&repo, a.address).unwrap();
        assert_eq!(a_dir.names().collect::<Vec<_>>(), vec!["file1"]);
    }

    #[test]
    fn test_name_is_not_searched_outside_current_directory() {
        let (repo, root) = fixture();
        let resolver = TreeResolver::new(&repo);

        // "shared" and "main" exist deeper in the tree but not in the root
        assert!(!resolver.resolve_path(&root, "/shared").unwrap().is_found());
        assert!(!resolver.resolve_path(&root, "/main").unwrap().is_found());
        assert!(!resolver.resolve_path(&root, "/a/file1").unwrap().is_found());
    }

    #[test]
    fn test_reads_only_directories_on_path() {
        let (repo, root) = fixture();
        let resolver = TreeResolver::new(&repo);

        resolver.resolve_path(&root, "/a/shared/file1").unwrap();
        // root, a, a/shared
        assert_eq!(repo.reads(), 3);
    }

    #[test]
    fn test_missing_subtree_is_store_error() {
        let mut builder = MemoryRepository::builder();
        let dangling = ContentAddress::for_object(ObjectType::Tree, b"nowhere");
        let mut root = TreeBuilder::new();
        root.insert("gone", NodeKind::Directory, dangling).unwrap();
        let root = builder.add_tree(&root);
        let repo = builder.build();
        let resolver = TreeResolver::new(&repo);

        let result = resolver.resolve_path(&TreeEntry::root(root), "/gone/file");
        assert_eq!(result, Err(StoreError::ObjectNotFound(dangling)));
    }

    #[test]
    fn test_ambiguous_siblings_are_never_picked() {
        let mut builder = MemoryRepository::builder();
        let one = builder.add_blob("1");
        let two = builder.add_blob("2");
        let body = tree_store::codec::encode_tree(&[
            TreeEntry::new("dup", NodeKind::RegularFile, one),
            TreeEntry::new("dup", NodeKind::RegularFile, two),
        ]);
        let root = builder.add_raw(ObjectType::Tree, body);
        let repo = builder.build();
        let resolver = TreeResolver::new(&repo);

        let result = resolver.resolve_path(&TreeEntry::root(root), "/dup");
        assert!(matches!(result, Err(StoreError::CorruptObject { .. })));
    }
}
