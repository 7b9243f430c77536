//! # Filesystem View
//!
//! This crate resolves slash-separated paths against an immutable tree of
//! content-addressed objects.
//!
//! ## Philosophy
//!
//! - **Paths are views, not storage**: a path is only a walk over tree objects
//! - **Names are local**: a name means something only inside its directory
//! - **Nothing is loaded ahead of time**: each step reads one tree
//!
//! ## Design
//!
//! - [`PathResolver`] splits a path into components
//! - [`DirectoryView`] is one loaded tree with a name index
//! - [`TreeResolver`] walks components from a root, one level per component

pub mod directory;
pub mod path;
pub mod resolve;

pub use directory::DirectoryView;
pub use path::PathResolver;
pub use resolve::{ResolvedPath, TreeResolver};
