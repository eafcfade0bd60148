/// Pipe-delimited rendering of posts.
///
/// Quoting is minimal: a field is wrapped in double quotes only when it
/// contains the delimiter, a double quote, CR or LF, and inner quotes are
/// doubled. Captions are the only field that realistically needs it.
use std::borrow::Cow;
use std::io::{self, Write};

use crate::types::Post;

/// Field separator.
pub const DELIMITER: char = '|';

/// Column names, in row order. Files are header-free by default, so this
/// order is the schema; new columns only ever go at the end.
pub const COLUMNS: [&str; 10] = [
    "id",
    "owner_id",
    "created_time",
    "typename",
    "comment_count",
    "like_count",
    "video_view_count",
    "shortcode",
    "caption",
    "owner_username",
];

/// Rendering of `created_time`, always UTC.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write `posts` as one delimited line each, optionally preceded by a header line.
///
/// # Errors
///
/// Propagates any I/O error from `out`.
pub fn write_delimited<W: Write>(out: &mut W, posts: &[Post], header: bool) -> io::Result<()> {
    if header {
        write_row(out, COLUMNS.iter().map(|c| Cow::Borrowed(*c)))?;
    }
    for post in posts {
        write_row(out, row(post).into_iter())?;
    }
    Ok(())
}

fn write_row<'a, W: Write>(out: &mut W, fields: impl Iterator<Item = Cow<'a, str>>) -> io::Result<()> {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            write!(out, "{DELIMITER}")?;
        }
        out.write_all(quote_field(&field).as_bytes())?;
    }
    writeln!(out)
}

/// Render a post's fields in `COLUMNS` order. Missing values become empty strings.
#[must_use]
pub fn row(post: &Post) -> [Cow<'_, str>; 10] {
    fn opt(v: Option<&String>) -> Cow<'_, str> {
        v.map_or(Cow::Borrowed(""), |s| Cow::Borrowed(s.as_str()))
    }
    fn num(v: Option<u64>) -> Cow<'static, str> {
        v.map_or(Cow::Borrowed(""), |n| Cow::Owned(n.to_string()))
    }

    [
        Cow::Borrowed(post.id.as_str()),
        opt(post.owner_id.as_ref()),
        post.created_time
            .map_or(Cow::Borrowed(""), |t| Cow::Owned(t.format(DATETIME_FORMAT).to_string())),
        opt(post.typename.as_ref()),
        num(post.comment_count),
        num(post.like_count),
        num(post.video_view_count),
        opt(post.shortcode.as_ref()),
        opt(post.caption.as_ref()),
        opt(post.owner_username.as_ref()),
    ]
}

/// Quote a field if it would otherwise break the row.
#[must_use]
pub fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains([DELIMITER, '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
