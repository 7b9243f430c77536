//! Node attributes
//!
//! Maps node kinds onto the metadata a `stat(2)` caller expects.

use core::fmt;
use tree_store::NodeKind;

use crate::config::ViewConfig;

/// File type bits for a directory
pub const S_IFDIR: u32 = 0o040000;
/// File type bits for a regular file
pub const S_IFREG: u32 = 0o100000;
/// File type bits for a symbolic link
pub const S_IFLNK: u32 = 0o120000;

/// Permission bits for directories (rwxr-xr-x)
pub const DIRECTORY_PERMISSIONS: u32 = 0o755;
/// Permission bits for files and links (rw-r--r--)
pub const FILE_PERMISSIONS: u32 = 0o644;
/// Permission bits for executables when the executable bit is surfaced
pub const EXECUTABLE_PERMISSIONS: u32 = 0o755;

/// File type as seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Directory,
    RegularFile,
    Symlink,
}

impl FileType {
    /// The `S_IFMT` bits for this type
    pub const fn format_bits(&self) -> u32 {
        match self {
            FileType::Directory => S_IFDIR,
            FileType::RegularFile => S_IFREG,
            FileType::Symlink => S_IFLNK,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Directory => write!(f, "directory"),
            FileType::RegularFile => write!(f, "regular"),
            FileType::Symlink => write!(f, "symlink"),
        }
    }
}

/// Metadata reported for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRecord {
    /// File type
    pub file_type: FileType,
    /// Permission bits
    pub permissions: u32,
    /// Hard link count
    pub nlink: u32,
    /// Owner uid
    pub uid: u32,
    /// Owner gid
    pub gid: u32,
}

impl AttributeRecord {
    /// Attributes for a node of the given kind
    pub fn for_kind(kind: NodeKind, config: &ViewConfig) -> Self {
        let (file_type, permissions, nlink) = match kind {
            NodeKind::Directory => (FileType::Directory, DIRECTORY_PERMISSIONS, 2),
            NodeKind::RegularFile => (FileType::RegularFile, FILE_PERMISSIONS, 1),
            NodeKind::ExecutableFile if config.surface_executable_bit => {
                (FileType::RegularFile, EXECUTABLE_PERMISSIONS, 1)
            }
            NodeKind::ExecutableFile => (FileType::RegularFile, FILE_PERMISSIONS, 1),
            NodeKind::SymbolicLink => (FileType::Symlink, FILE_PERMISSIONS, 1),
        };

        Self {
            file_type,
            permissions,
            nlink,
            uid: config.uid,
            gid: config.gid,
        }
    }

    /// Attributes reported for the root directory
    pub fn directory(config: &ViewConfig) -> Self {
        Self::for_kind(NodeKind::Directory, config)
    }

    /// The full `st_mode` value (type bits and permissions)
    pub fn mode(&self) -> u32 {
        self.file_type.format_bits() | self.permissions
    }

    /// Returns true for directories
    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

impl fmt::Display for AttributeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mode={:o} nlink={} uid={} gid={}",
            self.file_type,
            self.mode(),
            self.nlink,
            self.uid,
            self.gid
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_attributes() {
        let attrs = AttributeRecord::for_kind(NodeKind::Directory, &ViewConfig::default());
        assert_eq!(attrs.file_type, FileType::Directory);
        assert_eq!(attrs.permissions, 0o755);
        assert_eq!(attrs.nlink, 2);
        assert_eq!(attrs.mode(), 0o040755);
    }

    #[test]
    fn test_regular_file_attributes() {
        let attrs = AttributeRecord::for_kind(NodeKind::RegularFile, &ViewConfig::default());
        assert_eq!(attrs.file_type, FileType::RegularFile);
        assert_eq!(attrs.mode(), 0o100644);
        assert_eq!(attrs.nlink, 1);
    }

    #[test]
    fn test_executable_masked_by_default() {
        let attrs = AttributeRecord::for_kind(NodeKind::ExecutableFile, &ViewConfig::default());
        assert_eq!(attrs.file_type, FileType::RegularFile);
        assert_eq!(attrs.mode(), 0o100644);
    }

    #[test]
    fn test_executable_bit_surfaced_when_configured() {
        let config = ViewConfig::default().with_executable_bit(true);
        let attrs = AttributeRecord::for_kind(NodeKind::ExecutableFile, &config);
        assert_eq!(attrs.mode(), 0o100755);

        // Plain files are unaffected
        let attrs = AttributeRecord::for_kind(NodeKind::RegularFile, &config);
        assert_eq!(attrs.mode(), 0o100644);
    }

    #[test]
    fn test_symlink_attributes() {
        let attrs = AttributeRecord::for_kind(NodeKind::SymbolicLink, &ViewConfig::default());
        assert_eq!(attrs.file_type, FileType::Symlink);
        assert_eq!(attrs.mode(), 0o120644);
        assert_eq!(attrs.nlink, 1);
    }

    #[test]
    fn test_owner_from_config() {
        let config = ViewConfig::default().with_owner(1000, 100);
        let attrs = AttributeRecord::directory(&config);
        assert_eq!((attrs.uid, attrs.gid), (1000, 100));
    }

    #[test]
    fn test_display() {
        let attrs = AttributeRecord::directory(&ViewConfig::default());
        assert_eq!(attrs.to_string(), "directory mode=40755 nlink=2 uid=0 gid=0");
    }
}
