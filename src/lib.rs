//! Batch desktop-app packaging library
//!
//! Drives an external web-app packager (nativefier) across deployment
//! environments and CPU architectures, one build at a time, and compresses
//! every build with whatever archive tool the host provides.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, Result};
