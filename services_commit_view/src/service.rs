//! Commit view implementation
//!
//! A `CommitView` pins one root tree and answers filesystem calls against
//! it. It owns no mutable state, so one view may serve concurrent calls.

use crate::attributes::AttributeRecord;
use crate::config::ViewConfig;
use crate::listing::DirectoryListing;
use crate::operations::{CommitFileSystem, ViewError, ViewResult};
use fs_view::{DirectoryView, PathResolver, ResolvedPath, TreeResolver};
use tree_store::{ContentAddress, NodeKind, Repository, StoreError, TreeEntry};

/// A read-only filesystem view of one commit
///
/// Borrows the repository; the pinned root never changes for the lifetime
/// of the view.
pub struct CommitView<'r, R: ?Sized> {
    repo: &'r R,
    root: TreeEntry,
    commit: Option<ContentAddress>,
    config: ViewConfig,
}

impl<'r, R: Repository + ?Sized> CommitView<'r, R> {
    /// Opens a view of the commit at `commit`
    ///
    /// A commit missing from the store reports `NoSuchEntry`; the view cannot
    /// be created.
    pub fn open(repo: &'r R, commit: ContentAddress, config: ViewConfig) -> ViewResult<Self> {
        let decoded = match repo.read_commit(&commit) {
            Ok(decoded) => decoded,
            Err(StoreError::ObjectNotFound(_)) => {
                tracing::debug!(commit = %commit.short(), "commit not in store");
                return Err(ViewError::NoSuchEntry(commit.to_hex()));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::debug!(
            commit = %commit.short(),
            tree = %decoded.tree.short(),
            "opened commit view"
        );
        Ok(Self {
            repo,
            root: TreeEntry::root(decoded.tree),
            commit: Some(commit),
            config,
        })
    }

    /// Creates a view rooted directly at a tree
    pub fn from_tree(repo: &'r R, tree: ContentAddress, config: ViewConfig) -> Self {
        Self {
            repo,
            root: TreeEntry::root(tree),
            commit: None,
            config,
        }
    }

    /// The pinned root directory
    pub fn root(&self) -> &TreeEntry {
        &self.root
    }

    /// The commit this view was opened from, if any
    pub fn commit(&self) -> Option<ContentAddress> {
        self.commit
    }

    /// The view configuration
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Resolves a path against the pinned root
    pub fn resolve(&self, path: &str) -> ViewResult<ResolvedPath> {
        TreeResolver::new(self.repo)
            .resolve_path(&self.root, path)
            .map_err(|err| store_failure(path, err))
    }

    /// Resolves a path, turning `NotFound` into `NoSuchEntry`
    fn lookup(&self, path: &str) -> ViewResult<TreeEntry> {
        self.resolve(path)?
            .into_node()
            .ok_or_else(|| ViewError::NoSuchEntry(path.to_string()))
    }
}

fn store_failure(path: &str, err: StoreError) -> ViewError {
    tracing::warn!(path = %path, error = %err, "store failure during resolution");
    ViewError::Store(err)
}

impl<R: Repository + ?Sized> CommitFileSystem for CommitView<'_, R> {
    fn attributes(&self, path: &str) -> ViewResult<AttributeRecord> {
        if PathResolver::is_root(path) {
            return Ok(AttributeRecord::directory(&self.config));
        }

        let node = self.lookup(path)?;
        Ok(AttributeRecord::for_kind(node.kind, &self.config))
    }

    fn list_directory(&self, path: &str) -> ViewResult<DirectoryListing> {
        let node = self.lookup(path)?;
        match node.kind {
            NodeKind::Directory => {
                let directory = DirectoryView::load(self.repo, node.address)
                    .map_err(|err| store_failure(path, err))?;
                Ok(DirectoryListing::new(directory))
            }
            NodeKind::RegularFile | NodeKind::ExecutableFile | NodeKind::SymbolicLink => {
                Err(ViewError::NotADirectory(path.to_string()))
            }
        }
    }

    fn read_link(&self, path: &str) -> ViewResult<Vec<u8>> {
        let node = self.lookup(path)?;
        match node.kind {
            NodeKind::SymbolicLink => self
                .repo
                .read_blob(&node.address)
                .map_err(|err| store_failure(path, err)),
            NodeKind::Directory | NodeKind::RegularFile | NodeKind::ExecutableFile => {
                Err(ViewError::NotASymlink(path.to_string()))
            }
        }
    }

    fn check_access(&self, path: &str) -> ViewResult<()> {
        if PathResolver::is_root(path) {
            return Ok(());
        }

        self.lookup(path).map(|_| ())
    }
}
