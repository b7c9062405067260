//! Query parameter types for API handlers.

use watchlist_core::query::ListQuery;

/// Raw `GET /api/records` parameters.
///
/// Kept as strings so a non-numeric `page` or `pageSize` falls back to the
/// default instead of rejecting the request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl RecordListParams {
    /// Build from decoded query pairs. The first occurrence of a repeated key
    /// wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "pageSize" => &mut params.page_size,
                "search" => &mut params.search,
                "status" => &mut params.status,
                "sort" => &mut params.sort,
                "dir" => &mut params.dir,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    pub fn to_list_query(&self) -> ListQuery {
        ListQuery::parse(
            self.page.as_deref(),
            self.page_size.as_deref(),
            self.search.as_deref(),
            self.status.as_deref(),
            self.sort.as_deref(),
            self.dir.as_deref(),
        )
    }
}
