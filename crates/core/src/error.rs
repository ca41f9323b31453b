//! Error type for gtestgen-core.
//!
//! Structural problems with a project document, a target path that cannot be
//! made project-relative, a missing header, and I/O failures. The duplicate
//! guard of the splicer is not an error; see [`crate::splice::SpliceOutcome`].

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{DocumentKind, RegionKind};

#[derive(Debug, Error)]
pub enum Error {
    /// No `<ItemGroup>` holding the required element kind.
    #[error("{document}: no <ItemGroup> holding {kind} entries")]
    MissingRegion { document: DocumentKind, kind: RegionKind },

    /// An `<ItemGroup>` opener with no matching closer.
    #[error("{document}: <ItemGroup> opened at byte {offset} is never closed")]
    UnclosedRegion { document: DocumentKind, offset: usize },

    #[error("test path '{path}' does not contain the project root segment '{marker}'")]
    TestRootNotFound { path: String, marker: String },

    #[error("header {class_name}.h not found under {}", root.display())]
    HeaderNotFound { class_name: String, root: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// True for errors caused by the shape of a project or filters document.
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::MissingRegion { .. } | Error::UnclosedRegion { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
