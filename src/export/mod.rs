/// Export layer: write fetched posts to a file.
pub mod delimited;
pub mod errors;
pub mod json;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use tracing::info;

use crate::types::Post;

pub use errors::ExportError;

/// File formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ExportFormat {
    /// Pipe-delimited text, one row per post.
    #[default]
    Pipe,
    /// Pretty-printed JSON array.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Export options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Write a header line with the column names (pipe format only).
    pub header: bool,
}

/// Write `posts` to `out` in the requested format.
///
/// # Errors
///
/// Propagates I/O errors from `out`.
pub fn write_posts<W: Write>(out: &mut W, posts: &[Post], opts: ExportOptions) -> io::Result<()> {
    match opts.format {
        ExportFormat::Pipe => delimited::write_delimited(out, posts, opts.header),
        ExportFormat::Json => json::write_json(out, posts),
        ExportFormat::Ndjson => json::write_ndjson(out, posts),
    }
}

/// Create (or truncate) `path` and write `posts` to it. Returns the number of
/// posts written.
///
/// An empty slice still truncates the file, so rows from an earlier run never
/// survive into this one.
///
/// # Errors
///
/// - `ExportError::Create` if the file cannot be created
/// - `ExportError::Write` if writing or flushing fails
pub fn export_posts(path: &Path, posts: &[Post], opts: ExportOptions) -> Result<usize, ExportError> {
    if posts.is_empty() {
        info!(path = %path.display(), "Nothing to export");
    } else {
        info!(path = %path.display(), "Exporting {} posts...", posts.len());
    }

    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_owned(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    write_posts(&mut out, posts, opts)
        .and_then(|()| out.flush())
        .map_err(|source| ExportError::Write {
            path: path.to_owned(),
            source,
        })?;

    Ok(posts.len())
}
