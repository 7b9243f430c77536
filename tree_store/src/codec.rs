//! Object body encoding
//!
//! Tree bodies are a run of `<octal mode> <name>\0<32 address bytes>`
//! records kept in insertion order. Commit bodies are a `tree` header, zero
//! or more `parent` headers, a blank line and the message.

use crate::address::{ContentAddress, ADDRESS_LEN};
use crate::object::{is_valid_entry_name, Commit, NodeKind, TreeEntry};
use crate::repository::{StoreError, StoreResult};

/// Encodes tree entries in the order given
pub fn encode_tree(entries: &[TreeEntry]) -> Vec<u8> {
    let mut body = Vec::new();
    for entry in entries {
        body.extend_from_slice(format!("{:o}", entry.kind.git_mode()).as_bytes());
        body.push(b' ');
        body.extend_from_slice(entry.name.as_bytes());
        body.push(0);
        body.extend_from_slice(entry.address.as_bytes());
    }
    body
}

/// Decodes a tree body stored under `address`
pub fn decode_tree(address: &ContentAddress, body: &[u8]) -> StoreResult<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut rest = body;

    while !rest.is_empty() {
        let space = rest
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| StoreError::corrupt(*address, "entry without mode separator"))?;
        let mode = core::str::from_utf8(&rest[..space])
            .ok()
            .filter(|s| !s.is_empty() && s.bytes().all(|b| (b'0'..=b'7').contains(&b)))
            .and_then(|s| u32::from_str_radix(s, 8).ok())
            .ok_or_else(|| StoreError::corrupt(*address, "unparseable entry mode"))?;
        let kind = NodeKind::from_git_mode(mode)
            .ok_or_else(|| StoreError::corrupt(*address, format!("unsupported mode {:o}", mode)))?;
        rest = &rest[space + 1..];

        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| StoreError::corrupt(*address, "unterminated entry name"))?;
        let name = core::str::from_utf8(&rest[..nul])
            .map_err(|_| StoreError::corrupt(*address, "entry name is not UTF-8"))?;
        if !is_valid_entry_name(name) {
            return Err(StoreError::corrupt(
                *address,
                format!("invalid entry name {:?}", name),
            ));
        }
        rest = &rest[nul + 1..];

        if rest.len() < ADDRESS_LEN {
            return Err(StoreError::corrupt(*address, "truncated entry address"));
        }
        let mut target = [0u8; ADDRESS_LEN];
        target.copy_from_slice(&rest[..ADDRESS_LEN]);
        rest = &rest[ADDRESS_LEN..];

        entries.push(TreeEntry::new(name, kind, ContentAddress::from_bytes(target)));
    }

    Ok(entries)
}

/// Encodes a commit
pub fn encode_commit(commit: &Commit) -> Vec<u8> {
    let mut text = format!("tree {}\n", commit.tree);
    for parent in &commit.parents {
        text.push_str(&format!("parent {}\n", parent));
    }
    text.push('\n');
    text.push_str(&commit.message);
    text.into_bytes()
}

/// Decodes a commit body stored under `address`
pub fn decode_commit(address: &ContentAddress, body: &[u8]) -> StoreResult<Commit> {
    let text = core::str::from_utf8(body)
        .map_err(|_| StoreError::corrupt(*address, "commit is not UTF-8"))?;
    let (headers, message) = text
        .split_once("\n\n")
        .ok_or_else(|| StoreError::corrupt(*address, "commit without message separator"))?;

    let mut tree = None;
    let mut parents = Vec::new();
    for line in headers.lines() {
        let (key, value) = line
            .split_once(' ')
            .ok_or_else(|| StoreError::corrupt(*address, format!("malformed header {:?}", line)))?;
        let parsed: ContentAddress = value
            .parse()
            .map_err(|e| StoreError::corrupt(*address, format!("{} header: {}", key, e)))?;
        match key {
            "tree" if tree.is_none() => tree = Some(parsed),
            "tree" => return Err(StoreError::corrupt(*address, "duplicate tree header")),
            "parent" => parents.push(parsed),
            other => {
                return Err(StoreError::corrupt(
                    *address,
                    format!("unknown header {:?}", other),
                ))
            }
        }
    }

    let tree = tree.ok_or_else(|| StoreError::corrupt(*address, "commit without tree"))?;
    Ok(Commit {
        tree,
        parents,
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectType;

    fn blob(data: &[u8]) -> ContentAddress {
        ContentAddress::for_object(ObjectType::Blob, data)
    }

    fn tree_addr() -> ContentAddress {
        ContentAddress::for_object(ObjectType::Tree, b"")
    }

    #[test]
    fn test_tree_preserves_insertion_order() {
        let entries = vec![
            TreeEntry::new("zeta", NodeKind::RegularFile, blob(b"z")),
            TreeEntry::new("alpha", NodeKind::Directory, tree_addr()),
            TreeEntry::new("run.sh", NodeKind::ExecutableFile, blob(b"#!")),
            TreeEntry::new("link", NodeKind::SymbolicLink, blob(b"../x")),
        ];
        let body = encode_tree(&entries);
        let decoded = decode_tree(&tree_addr(), &body).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_directory_mode_has_no_leading_zero() {
        let entries = vec![TreeEntry::new("src", NodeKind::Directory, tree_addr())];
        let body = encode_tree(&entries);
        assert!(body.starts_with(b"40000 src\0"));
    }

    #[test]
    fn test_empty_tree() {
        assert!(encode_tree(&[]).is_empty());
        assert!(decode_tree(&tree_addr(), b"").unwrap().is_empty());
    }

    #[test]
    fn test_truncated_address_is_corrupt() {
        let entries = vec![TreeEntry::new("README", NodeKind::RegularFile, blob(b"hi"))];
        let body = encode_tree(&entries);
        let result = decode_tree(&tree_addr(), &body[..body.len() - 1]);
        assert!(matches!(result, Err(StoreError::CorruptObject { .. })));
    }

    #[test]
    fn test_gitlink_mode_is_corrupt() {
        let mut body = b"160000 sub\0".to_vec();
        body.extend_from_slice(blob(b"x").as_bytes());
        let result = decode_tree(&tree_addr(), &body);
        assert!(matches!(result, Err(StoreError::CorruptObject { .. })));
    }

    #[test]
    fn test_signed_mode_is_corrupt() {
        let mut body = b"+100644 a\0".to_vec();
        body.extend_from_slice(blob(b"x").as_bytes());
        let result = decode_tree(&tree_addr(), &body);
        assert!(matches!(result, Err(StoreError::CorruptObject { .. })));
    }

    #[test]
    fn test_slash_in_name_is_corrupt() {
        let mut body = b"100644 a/b\0".to_vec();
        body.extend_from_slice(blob(b"x").as_bytes());
        let result = decode_tree(&tree_addr(), &body);
        assert!(matches!(result, Err(StoreError::CorruptObject { .. })));
    }

    #[test]
    fn test_missing_name_terminator_is_corrupt() {
        let result = decode_tree(&tree_addr(), b"100644 README");
        assert!(matches!(result, Err(StoreError::CorruptObject { .. })));
    }

    #[test]
    fn test_commit_roundtrip() {
        let parent = ContentAddress::for_object(ObjectType::Commit, b"p");
        let commit = Commit::new(tree_addr(), "add README\n").with_parent(parent);
        let body = encode_commit(&commit);
        let addr = ContentAddress::for_object(ObjectType::Commit, &body);
        assert_eq!(decode_commit(&addr, &body).unwrap(), commit);
    }

    #[test]
    fn test_commit_without_tree_is_corrupt() {
        let addr = ContentAddress::for_object(ObjectType::Commit, b"");
        let result = decode_commit(&addr, b"\n\nmessage");
        assert!(matches!(result, Err(StoreError::CorruptObject { .. })));
    }

    #[test]
    fn test_commit_bad_hex_is_corrupt() {
        let addr = ContentAddress::for_object(ObjectType::Commit, b"");
        let result = decode_commit(&addr, b"tree nothex\n\nmessage");
        assert!(matches!(result, Err(StoreError::CorruptObject { .. })));
    }
}
