/// Decoding of the hashtag feed response into `FeedPage`s.
///
/// The endpoint returns a deeply nested GraphQL-style document:
///
/// ```text
/// graphql.hashtag.edge_hashtag_to_media
///     .page_info { has_next_page, end_cursor }
///     .edges[].node { id, shortcode, owner, taken_at_timestamp, ... }
/// ```
///
/// Every node field is optional; the API drops fields freely. A node without
/// an `id` is kept with an empty one rather than failing the page.
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::Post;

/// One decoded page of the hashtag feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    /// Posts on this page, in the order the endpoint returned them.
    pub posts: Vec<Post>,
    /// Cursor for the next page, sent back as `max_id`.
    pub end_cursor: Option<String>,
    /// Whether the endpoint claims more pages exist.
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    graphql: Graphql,
}

#[derive(Debug, Deserialize)]
struct Graphql {
    hashtag: Hashtag,
}

#[derive(Debug, Deserialize)]
struct Hashtag {
    edge_hashtag_to_media: MediaConnection,
}

#[derive(Debug, Deserialize)]
struct MediaConnection {
    #[serde(default)]
    page_info: PageInfo,
    #[serde(default)]
    edges: Vec<MediaEdge>,
}

#[derive(Debug, Default, Deserialize)]
struct PageInfo {
    #[serde(default)]
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaEdge {
    node: MediaNode,
}

#[derive(Debug, Deserialize)]
struct MediaNode {
    id: Option<String>,
    shortcode: Option<String>,
    #[serde(rename = "__typename")]
    typename: Option<String>,
    owner: Option<Owner>,
    taken_at_timestamp: Option<i64>,
    edge_media_to_comment: Option<Count>,
    edge_liked_by: Option<Count>,
    video_view_count: Option<u64>,
    edge_media_to_caption: Option<CaptionConnection>,
}

#[derive(Debug, Deserialize)]
struct Owner {
    id: Option<String>,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Count {
    count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CaptionConnection {
    #[serde(default)]
    edges: Vec<CaptionEdge>,
}

#[derive(Debug, Deserialize)]
struct CaptionEdge {
    node: CaptionNode,
}

#[derive(Debug, Deserialize)]
struct CaptionNode {
    text: Option<String>,
}

/// Decode a raw response body into a `FeedPage`.
///
/// # Errors
///
/// Returns the JSON error if the body is not a hashtag feed document.
pub fn decode_page(body: &str) -> Result<FeedPage, serde_json::Error> {
    let envelope: Envelope = serde_json::from_str(body)?;
    let media = envelope.graphql.hashtag.edge_hashtag_to_media;

    Ok(FeedPage {
        posts: media.edges.into_iter().map(|e| node_to_post(e.node)).collect(),
        end_cursor: media.page_info.end_cursor,
        has_next_page: media.page_info.has_next_page,
    })
}

fn node_to_post(node: MediaNode) -> Post {
    let (owner_id, owner_username) = node
        .owner
        .map_or((None, None), |o| (o.id, o.username));

    let caption = node
        .edge_media_to_caption
        .and_then(|c| c.edges.into_iter().next())
        .and_then(|e| e.node.text);

    Post {
        id: node.id.unwrap_or_default(),
        shortcode: node.shortcode,
        owner_id,
        owner_username,
        created_time: node.taken_at_timestamp.and_then(timestamp_to_utc),
        typename: node.typename,
        comment_count: node.edge_media_to_comment.and_then(|c| c.count),
        like_count: node.edge_liked_by.and_then(|c| c.count),
        video_view_count: node.video_view_count,
        caption,
    }
}

/// Unix seconds to UTC. Out-of-range values are treated as missing.
fn timestamp_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(edges: serde_json::Value, page_info: serde_json::Value) -> String {
        json!({
            "graphql": {
                "hashtag": {
                    "name": "rust",
                    "edge_hashtag_to_media": {
                        "count": 12345,
                        "page_info": page_info,
                        "edges": edges,
                    }
                }
            }
        })
        .to_string()
    }

    #[test]
    fn test_decode_full_node() {
        let raw = body(
            json!([{
                "node": {
                    "id": "3141592653589793",
                    "__typename": "GraphVideo",
                    "shortcode": "CxYz123",
                    "owner": { "id": "42", "username": "ferris" },
                    "taken_at_timestamp": 1_700_000_000,
                    "edge_media_to_comment": { "count": 7 },
                    "edge_liked_by": { "count": 99 },
                    "video_view_count": 1200,
                    "edge_media_to_caption": {
                        "edges": [
                            { "node": { "text": "hello #rust" } },
                            { "node": { "text": "ignored" } }
                        ]
                    }
                }
            }]),
            json!({ "has_next_page": true, "end_cursor": "QVFE" }),
        );

        let page = decode_page(&raw).unwrap();
        assert!(page.has_next_page);
        assert_eq!(page.end_cursor.as_deref(), Some("QVFE"));
        assert_eq!(page.posts.len(), 1);

        let post = &page.posts[0];
        assert_eq!(post.id, "3141592653589793");
        assert_eq!(post.shortcode.as_deref(), Some("CxYz123"));
        assert_eq!(post.owner_id.as_deref(), Some("42"));
        assert_eq!(post.owner_username.as_deref(), Some("ferris"));
        assert_eq!(post.typename.as_deref(), Some("GraphVideo"));
        assert_eq!(post.comment_count, Some(7));
        assert_eq!(post.like_count, Some(99));
        assert_eq!(post.video_view_count, Some(1200));
        assert_eq!(post.caption.as_deref(), Some("hello #rust"));
        assert_eq!(
            post.created_time.unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }

    #[test]
    fn test_decode_sparse_node() {
        let raw = body(
            json!([{ "node": { "id": "1", "edge_media_to_caption": { "edges": [] } } }]),
            json!({ "has_next_page": false, "end_cursor": null }),
        );
        let page = decode_page(&raw).unwrap();
        let post = &page.posts[0];
        assert_eq!(post.id, "1");
        assert!(post.caption.is_none());
        assert!(post.created_time.is_none());
        assert!(post.owner_id.is_none());
        assert!(!page.has_next_page);
        assert!(page.end_cursor.is_none());
    }

    #[test]
    fn test_node_without_id_keeps_page() {
        let raw = body(
            json!([
                { "node": { "taken_at_timestamp": 1_700_000_000, "shortcode": "NoId" } },
                { "node": { "id": null, "taken_at_timestamp": 1_700_000_050 } },
                { "node": { "id": "2", "taken_at_timestamp": 1_700_000_100 } }
            ]),
            json!({ "has_next_page": true, "end_cursor": "next" }),
        );
        let page = decode_page(&raw).unwrap();
        assert_eq!(page.posts.len(), 3);
        assert_eq!(page.posts[0].id, "");
        assert_eq!(page.posts[1].id, "");
        assert_eq!(page.posts[0].shortcode.as_deref(), Some("NoId"));
        assert!(page.posts[0].created_time.is_some());
        assert_eq!(page.posts[2].id, "2");
    }

    #[test]
    fn test_decode_missing_page_info() {
        let raw = json!({
            "graphql": { "hashtag": { "edge_hashtag_to_media": { "edges": [] } } }
        })
        .to_string();
        let page = decode_page(&raw).unwrap();
        assert_eq!(page, FeedPage::default());
    }

    #[test]
    fn test_decode_rejects_other_documents() {
        // What the endpoint serves when it wants a login.
        assert!(decode_page(r#"{"message":"Please wait a few minutes","status":"fail"}"#).is_err());
        assert!(decode_page("<!DOCTYPE html><html></html>").is_err());
    }
}
