use std::path::PathBuf;

use thiserror::Error;

pub type ModuleResult<T> = Result<T, ModuleError>;

/// Why a module could not be brought up. Never fatal to the host: the record
/// falls back to the no-op table.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("module file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to stage {} as {}: {source}", .from.display(), .to.display())]
    Stage {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("{} does not export `{symbol}`", .path.display())]
    MissingSymbol { path: PathBuf, symbol: &'static str },

    #[error("{} reports ABI version {version}; this host knows {known:?}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        version: u32,
        known: &'static [u32],
    },

    #[error("{} returned a v{found} table from the v{expected} getter", .path.display())]
    TableMismatch {
        path: PathBuf,
        expected: u32,
        found: u32,
    },
}
