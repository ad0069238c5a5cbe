use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions detected before any frame loop starts. Never retried.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("no approved users in {0} (add <name>.jpg images there)")]
    NoTemplates(PathBuf),
    #[error("template registry is empty")]
    EmptyRegistry,
    #[error("no slides were found in {0}")]
    NoSlides(PathBuf),
    #[error("frame source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-frame read failure. Transient: the frame is skipped.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("frame read failed: {0}")]
    Read(String),
    #[error("malformed frame record on line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
