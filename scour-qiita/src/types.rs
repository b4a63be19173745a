use serde::{Deserialize, Serialize};

/// One matching item returned by the search API.
///
/// Value semantics only: produced once per query, replaced wholesale by the
/// next query's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    /// Timestamp string as returned by the API (RFC 3339); not parsed here.
    pub created_at: String,
    pub author_id: String,
    pub author_name: String,
    pub likes_count: u64,
}

/// The fields we require from one response element. Anything missing or
/// mistyped fails this element's deserialization and the element is dropped.
#[derive(Debug, Deserialize)]
struct RawItem {
    title: String,
    created_at: String,
    user: RawUser,
    likes_count: u64,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: String,
    name: String,
}

/// Decode response elements one at a time so a single malformed entry (a
/// deleted user, a null field) cannot poison its well-formed siblings.
/// Order is preserved.
pub fn parse_items(items: Vec<serde_json::Value>) -> Vec<SearchResult> {
    let total = items.len();
    let results: Vec<SearchResult> = items
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<RawItem>(raw) {
            Ok(item) => Some(SearchResult {
                title: item.title,
                created_at: item.created_at,
                author_id: item.user.id,
                author_name: item.user.name,
                likes_count: item.likes_count,
            }),
            Err(e) => {
                tracing::trace!(reason = %e, "dropping malformed search entry");
                None
            }
        })
        .collect();
    if results.len() < total {
        tracing::debug!(
            kept = results.len(),
            dropped = total - results.len(),
            "search response contained malformed entries"
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_item(title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "created_at": "2022-03-13T10:00:00+09:00",
            "user": {"id": "ryu", "name": "Ryu"},
            "likes_count": 7,
            "tags": [{"name": "rust"}]
        })
    }

    #[test]
    fn well_formed_entries_decode_in_order() {
        let parsed = parse_items(vec![valid_item("a"), valid_item("b"), valid_item("c")]);
        let titles: Vec<&str> = parsed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);
        assert_eq!(parsed[0].author_id, "ryu");
        assert_eq!(parsed[0].likes_count, 7);
    }

    #[test]
    fn missing_field_drops_only_that_entry() {
        let mut broken = valid_item("broken");
        broken.as_object_mut().unwrap().remove("likes_count");
        let parsed = parse_items(vec![valid_item("a"), broken, valid_item("b")]);
        let titles: Vec<&str> = parsed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[test]
    fn mistyped_field_drops_only_that_entry() {
        let mut broken = valid_item("broken");
        broken["likes_count"] = json!("not a number");
        let parsed = parse_items(vec![broken, valid_item("survivor")]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "survivor");
    }

    #[test]
    fn null_user_name_drops_the_entry() {
        // Deleted accounts come back with a null name.
        let mut broken = valid_item("deleted author");
        broken["user"]["name"] = json!(null);
        assert!(parse_items(vec![broken]).is_empty());
    }

    #[test]
    fn negative_likes_count_drops_the_entry() {
        let mut broken = valid_item("negative");
        broken["likes_count"] = json!(-1);
        assert!(parse_items(vec![broken]).is_empty());
    }
}
