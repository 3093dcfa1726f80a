use serde::{Deserialize, Deserializer, Serialize};

/// Query parameters shared by every paginated feed.
///
/// **Usage**: `GET /?page=2`, `GET /group/rust/?page=3` and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageParams {
    /// The 1-indexed page number to fetch. Out-of-range and non-numeric
    /// values are clamped by the server instead of being rejected.
    #[serde(default, deserialize_with = "lenient_page_number")]
    pub page: Option<u64>,
}

// Query strings arrive as text. Anything that does not parse as a page
// number falls back to the first page, same as requesting no page at all.
fn lenient_page_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

/// One page of a feed along with where it sits in the whole result set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// The page actually served, after clamping.
    pub page: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

#[cfg(test)]
mod tests {
    use super::PageParams;

    fn parse(query: &str) -> PageParams {
        serde_urlencoded::from_str(query).unwrap()
    }

    #[test]
    fn should_accept_numeric_pages() {
        assert_eq!(parse("page=3").page, Some(3));
        assert_eq!(parse("").page, None);
    }

    #[test]
    fn should_fall_back_on_garbage_pages() {
        assert_eq!(parse("page=abc").page, None);
        assert_eq!(parse("page=-1").page, None);
        assert_eq!(parse("page=").page, None);
    }
}
