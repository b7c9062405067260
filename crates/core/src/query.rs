//! List query model: filtering, whitelisted sorting and page clamping.
//!
//! Raw query-string values are parsed leniently here. Unknown sort keys,
//! directions and unparseable numbers fall back to defaults; out-of-range
//! pages are clamped rather than rejected.

use std::cmp::Ordering;

use serde::Serialize;

use crate::record::Record;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of records per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Status filter value meaning "no filter".
pub const STATUS_ALL: &str = "ALL";

/// Clamp a user-provided page size to valid bounds.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Whitelisted sort columns. Raw `sort` values never reach a query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Title,
    Type,
    Genre,
    Year,
    Rating,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Title,
        SortKey::Type,
        SortKey::Genre,
        SortKey::Year,
        SortKey::Rating,
        SortKey::Status,
    ];

    /// Map a raw `sort` value onto the whitelist; anything else sorts by title.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("type") => SortKey::Type,
            Some("genre") => SortKey::Genre,
            Some("year") => SortKey::Year,
            Some("rating") => SortKey::Rating,
            Some("status") => SortKey::Status,
            _ => SortKey::Title,
        }
    }

    /// Backing column in the `records` table.
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Type => "record_type",
            SortKey::Genre => "genre",
            SortKey::Year => "year",
            SortKey::Rating => "rating",
            SortKey::Status => "status",
        }
    }

    /// Whether the column holds text and is compared case-insensitively.
    pub fn is_text(self) -> bool {
        !matches!(self, SortKey::Year | SortKey::Rating)
    }

    /// Ascending comparison on this key alone. Missing ratings sort last.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Title => fold_cmp(&a.title, &b.title),
            SortKey::Type => fold_cmp(&a.record_type, &b.record_type),
            SortKey::Genre => fold_cmp(&a.genre, &b.genre),
            SortKey::Status => fold_cmp(&a.status, &b.status),
            SortKey::Year => a.year.cmp(&b.year),
            SortKey::Rating => (a.rating.is_none(), a.rating).cmp(&(b.rating.is_none(), b.rating)),
        }
    }
}

fn fold_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("desc") => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// `ALL`, blank or absent means no filter; anything else is an exact match.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(STATUS_ALL) => StatusFilter::All,
            Some(status) => StatusFilter::Only(status.to_string()),
        }
    }
}

/// Escape `%`, `_` and `\` so user input is matched literally inside a
/// `LIKE`/`ILIKE` pattern using `ESCAPE '\'`.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Query + page window
// ---------------------------------------------------------------------------

/// A fully parsed `GET /api/records` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Requested page before clamping (1-based).
    pub page: i64,
    pub page_size: i64,
    /// Trimmed, non-empty title substring.
    pub search: Option<String>,
    pub status: StatusFilter,
    pub sort: SortKey,
    pub dir: SortDir,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            status: StatusFilter::All,
            sort: SortKey::Title,
            dir: SortDir::Asc,
        }
    }
}

impl ListQuery {
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        search: Option<&str>,
        status: Option<&str>,
        sort: Option<&str>,
        dir: Option<&str>,
    ) -> Self {
        Self {
            page: parse_int(page).unwrap_or(1),
            page_size: clamp_page_size(parse_int(page_size)),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            status: StatusFilter::parse(status),
            sort: SortKey::parse(sort),
            dir: SortDir::parse(dir),
        }
    }

    /// Whether a record passes the search and status filters.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(search) = &self.search {
            if !record.title.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        match &self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => record.status == *status,
        }
    }

    /// Full ordering: sort key, then title, then id, all following `dir`,
    /// so a descending listing is the exact reverse of the ascending one.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ord = self
            .sort
            .compare(a, b)
            .then_with(|| fold_cmp(&a.title, &b.title))
            .then_with(|| a.id.cmp(&b.id));
        match self.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Page bounds after clamping the requested page against the filtered total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageWindow {
    pub fn new(requested_page: i64, page_size: i64, total: i64) -> Self {
        let page_size = page_size.max(1);
        let total = total.max(0);
        let total_pages = ((total + page_size - 1) / page_size).max(1);
        Self {
            page: requested_page.clamp(1, total_pages),
            page_size,
            total,
            total_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Response body of `GET /api/records`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub items: Vec<Record>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl RecordPage {
    pub fn new(items: Vec<Record>, window: PageWindow) -> Self {
        Self {
            items,
            page: window.page,
            page_size: window.page_size,
            total: window.total,
            total_pages: window.total_pages,
        }
    }
}

/// Filter, sort and slice an in-memory collection.
pub fn paginate(records: Vec<Record>, query: &ListQuery) -> RecordPage {
    let mut matching: Vec<Record> = records.into_iter().filter(|r| query.matches(r)).collect();
    matching.sort_by(|a, b| query.compare(a, b));

    let window = PageWindow::new(query.page, query.page_size, matching.len() as i64);
    let items = matching
        .into_iter()
        .skip(window.offset() as usize)
        .take(window.page_size as usize)
        .collect();

    RecordPage::new(items, window)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::new_record_id;

    fn record(title: &str, genre: &str, year: i32, rating: Option<i32>, status: &str) -> Record {
        Record {
            id: new_record_id(),
            title: title.to_string(),
            record_type: "Movie".to_string(),
            genre: genre.to_string(),
            year,
            rating,
            status: status.to_string(),
            notes: String::new(),
            image_url: None,
        }
    }

    fn titles(page: &RecordPage) -> Vec<&str> {
        page.items.iter().map(|r| r.title.as_str()).collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            record("Inception", "Sci-Fi", 2010, Some(9), "Completed"),
            record("barbie", "Comedy", 2023, Some(7), "Completed"),
            record("Alien", "Sci-Fi", 1979, None, "Planned"),
            record("Dune", "Sci-Fi", 2021, Some(8), "Watching"),
            record("Chernobyl", "Drama", 2019, Some(10), "Dropped"),
        ]
    }

    // -- parsing -------------------------------------------------------------

    #[test]
    fn defaults_when_nothing_given() {
        assert_eq!(
            ListQuery::parse(None, None, None, None, None, None),
            ListQuery::default()
        );
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let q = ListQuery::parse(Some("abc"), Some("lots"), None, None, None, None);
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(clamp_page_size(Some(0)), 1);
        assert_eq!(clamp_page_size(Some(-3)), 1);
        assert_eq!(clamp_page_size(Some(500)), MAX_PAGE_SIZE);
        assert_eq!(clamp_page_size(Some(25)), 25);
    }

    #[test]
    fn unknown_sort_falls_back_to_title() {
        assert_eq!(SortKey::parse(Some("id; DROP TABLE records")), SortKey::Title);
        assert_eq!(SortKey::parse(Some(" YEAR ")), SortKey::Year);
        assert_eq!(SortDir::parse(Some("sideways")), SortDir::Asc);
        assert_eq!(SortDir::parse(Some("DESC")), SortDir::Desc);
    }

    #[test]
    fn status_filter_parsing() {
        assert_eq!(StatusFilter::parse(Some("ALL")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("  ")), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("Watching")),
            StatusFilter::Only("Watching".into())
        );
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    // -- page window ---------------------------------------------------------

    #[test]
    fn total_pages_has_floor_of_one() {
        let w = PageWindow::new(3, 10, 0);
        assert_eq!(w.total_pages, 1);
        assert_eq!(w.page, 1);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        for (total, expected) in [(1, 1), (10, 1), (11, 2), (35, 4), (40, 4)] {
            assert_eq!(PageWindow::new(1, 10, total).total_pages, expected, "total={total}");
        }
    }

    #[test]
    fn page_is_clamped_into_range() {
        assert_eq!(PageWindow::new(99, 10, 35).page, 4);
        assert_eq!(PageWindow::new(-2, 10, 35).page, 1);
        assert_eq!(PageWindow::new(0, 10, 35).page, 1);
    }

    // -- paginate ------------------------------------------------------------

    #[test]
    fn last_page_holds_remainder() {
        let records: Vec<Record> = (0..35)
            .map(|i| record(&format!("Title {i:02}"), "Drama", 2000, None, "Planned"))
            .collect();
        let q = ListQuery {
            page: 4,
            ..ListQuery::default()
        };
        let page = paginate(records, &q);
        assert_eq!(page.total, 35);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.page, 4);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].title, "Title 30");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let q = ListQuery {
            search: Some("IN".into()),
            ..ListQuery::default()
        };
        let page = paginate(sample(), &q);
        assert_eq!(titles(&page), vec!["Inception"]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn status_filter_is_exact() {
        let q = ListQuery {
            status: StatusFilter::Only("Completed".into()),
            ..ListQuery::default()
        };
        assert_eq!(titles(&paginate(sample(), &q)), vec!["barbie", "Inception"]);

        let q = ListQuery {
            status: StatusFilter::Only("completed".into()),
            ..ListQuery::default()
        };
        assert_eq!(paginate(sample(), &q).total, 0);
    }

    #[test]
    fn default_sort_is_title_case_insensitive() {
        let page = paginate(sample(), &ListQuery::default());
        assert_eq!(
            titles(&page),
            vec!["Alien", "barbie", "Chernobyl", "Dune", "Inception"]
        );
    }

    #[test]
    fn ties_break_on_title() {
        let q = ListQuery {
            sort: SortKey::Genre,
            ..ListQuery::default()
        };
        let page = paginate(sample(), &q);
        assert_eq!(
            titles(&page),
            vec!["barbie", "Chernobyl", "Alien", "Dune", "Inception"]
        );
    }

    #[test]
    fn missing_ratings_sort_last_ascending() {
        let q = ListQuery {
            sort: SortKey::Rating,
            ..ListQuery::default()
        };
        let page = paginate(sample(), &q);
        assert_eq!(page.items.last().unwrap().title, "Alien");
        assert_eq!(page.items[0].title, "barbie");
    }

    #[test]
    fn desc_is_exact_reverse_of_asc_for_every_key() {
        let mut records = sample();
        records.push(record("Dune", "Sci-Fi", 1984, None, "Planned"));
        records.push(record("Arrival", "Sci-Fi", 2016, Some(8), "Watching"));

        for key in SortKey::ALL {
            let asc = ListQuery {
                sort: key,
                page_size: MAX_PAGE_SIZE,
                ..ListQuery::default()
            };
            let desc = ListQuery {
                dir: SortDir::Desc,
                ..asc.clone()
            };
            let mut forward: Vec<_> = paginate(records.clone(), &asc)
                .items
                .into_iter()
                .map(|r| r.id)
                .collect();
            let backward: Vec<_> = paginate(records.clone(), &desc)
                .items
                .into_iter()
                .map(|r| r.id)
                .collect();
            forward.reverse();
            assert_eq!(forward, backward, "sort key {key:?}");
        }
    }

    #[test]
    fn sort_columns_are_fixed_identifiers() {
        for key in SortKey::ALL {
            assert!(key
                .column()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
