//! Path splitting
//!
//! Paths handed to a view are `/`-separated and relative to the commit root.
//! No `.` or `..` normalization happens here; callers pass normalized paths.

/// Path separator
pub const SEPARATOR: char = '/';

/// Path splitter
///
/// Turns a path string into the ordered components the resolver walks.
pub struct PathResolver;

impl PathResolver {
    /// Splits a path into components
    ///
    /// Empty components are dropped, so the root (`/`), the empty string and
    /// runs of slashes all split to nothing. Splitting never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_view::PathResolver;
    ///
    /// let components = PathResolver::split_path("/docs/notes/todo.txt");
    /// assert_eq!(components, vec!["docs", "notes", "todo.txt"]);
    ///
    /// assert!(PathResolver::split_path("/").is_empty());
    /// ```
    pub fn split_path(path: &str) -> Vec<&str> {
        path.split(SEPARATOR)
            .filter(|component| !component.is_empty())
            .collect()
    }

    /// Returns true if the path names the root
    pub fn is_root(path: &str) -> bool {
        path.chars().all(|c| c == SEPARATOR)
    }
}
