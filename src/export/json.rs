/// JSON renderings of posts: a pretty-printed array, or one object per line.
use std::io::{self, Write};

use crate::types::Post;

/// Write `posts` as a pretty-printed JSON array followed by a newline.
///
/// # Errors
///
/// Propagates I/O errors from `out`.
pub fn write_json<W: Write>(out: &mut W, posts: &[Post]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, posts)?;
    writeln!(out)
}

/// Write `posts` as newline-delimited JSON.
///
/// # Errors
///
/// Propagates I/O errors from `out`.
pub fn write_ndjson<W: Write>(out: &mut W, posts: &[Post]) -> io::Result<()> {
    for post in posts {
        serde_json::to_writer(&mut *out, post)?;
        writeln!(out)?;
    }
    Ok(())
}
