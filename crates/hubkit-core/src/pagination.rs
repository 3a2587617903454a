//! Pagination cursor and the walker that drains a paginated endpoint.
//!
//! The walker requests pages strictly in order, starting at page 0, and
//! stops after the page whose index reaches `totalPages - 1`. `totalPages`
//! is read from every response, so a collection that changes size during the
//! walk can make it stop early or request one extra, possibly empty, page.
//!
//! The first failed page ends the walk. Items gathered so far are returned
//! inside the [`PaginationError`] so the caller can decide whether a partial
//! list is usable. Nothing is retried.

use std::fmt;
use std::future::Future;

use url::form_urlencoded;

use crate::envelope::Collection;

/// Page size used for content item listings when none is given.
///
/// Item bodies can be large; the server rejects pages whose response grows
/// past its limit, which its default page size of 20 easily reaches.
pub const DEFAULT_ITEM_PAGE_SIZE: u32 = 6;

/// Lifecycle status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStatus {
    Active,
    Archived,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Active => "ACTIVE",
            ContentStatus::Archived => "ARCHIVED",
        }
    }
}

/// Response projection for content item listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Items without their bodies.
    Basic,
}

impl Projection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::Basic => "basic",
        }
    }
}

/// The cursor of a list request: page position plus resource filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: Option<u32>,
    /// Sort expression, e.g. `createdDate,desc`.
    pub sort: Option<String>,
    pub status: Option<ContentStatus>,
    pub folder_id: Option<String>,
    pub projection: Option<Projection>,
    pub exclude_hierarchical_children: bool,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// A copy of this query positioned at `page`.
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Apply the content item default page size, unless a size is set or
    /// the bodiless `basic` projection is requested.
    pub fn with_item_defaults(mut self) -> Self {
        if self.size.is_none() && self.projection != Some(Projection::Basic) {
            self.size = Some(DEFAULT_ITEM_PAGE_SIZE);
        }
        self
    }

    /// Encode as a URL query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &self.page.to_string());
        if let Some(size) = self.size.filter(|s| *s > 0) {
            query.append_pair("size", &size.to_string());
        }
        if let Some(status) = self.status {
            query.append_pair("status", status.as_str());
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("sort", sort);
        }
        if let Some(projection) = self.projection {
            query.append_pair("projection", projection.as_str());
        }
        if self.exclude_hierarchical_children {
            query.append_pair("excludeHierarchicalChildren", "true");
        }
        if let Some(folder_id) = self.folder_id.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("folderId", folder_id);
        }

        // The server does not decode an escaped comma in sort expressions.
        query.finish().replace("%2C", ",")
    }
}

/// A walk that ended on a failed page.
pub struct PaginationError<T, E> {
    /// Items of the pages fetched before the failure, in order.
    pub partial: Vec<T>,
    /// Why the page fetch failed.
    pub source: E,
}

impl<T, E> PaginationError<T, E> {
    /// Drop the partial results and keep the cause.
    pub fn into_source(self) -> E {
        self.source
    }
}

impl<T, E: fmt::Debug> fmt::Debug for PaginationError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationError")
            .field("partial", &self.partial.len())
            .field("source", &self.source)
            .finish()
    }
}

impl<T, E: fmt::Display> fmt::Display for PaginationError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pagination stopped after {} items: {}",
            self.partial.len(),
            self.source
        )
    }
}

impl<T, E> std::error::Error for PaginationError<T, E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Drain a paginated endpoint with a blocking page fetch.
pub fn collect_all<T, E, F>(mut fetch: F) -> Result<Vec<T>, PaginationError<T, E>>
where
    F: FnMut(u32) -> Result<Collection<T>, E>,
{
    let mut items = Vec::new();
    let mut page_index = 0;

    loop {
        match fetch(page_index) {
            Ok(page) => {
                let total_pages = page.page.total_pages;
                items.extend(page.items);
                if page_index + 1 < total_pages {
                    page_index += 1;
                } else {
                    return Ok(items);
                }
            }
            Err(source) => {
                return Err(PaginationError {
                    partial: items,
                    source,
                });
            }
        }
    }
}

/// Drain a paginated endpoint with an async page fetch.
///
/// Pages are still fetched one after another; the next page is only known
/// to exist once the previous response arrived.
pub async fn collect_all_async<T, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, PaginationError<T, E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Collection<T>, E>>,
{
    let mut items = Vec::new();
    let mut page_index = 0;

    loop {
        match fetch(page_index).await {
            Ok(page) => {
                let total_pages = page.page.total_pages;
                items.extend(page.items);
                if page_index + 1 < total_pages {
                    page_index += 1;
                } else {
                    return Ok(items);
                }
            }
            Err(source) => {
                return Err(PaginationError {
                    partial: items,
                    source,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{Links, PageInfo};

    fn page(number: u32, items: &[&'static str], total_pages: u32) -> Collection<&'static str> {
        Collection {
            links: Links::new(),
            page: PageInfo {
                size: 2,
                number,
                total_elements: 5,
                total_pages,
            },
            items: items.to_vec(),
        }
    }

    fn three_pages(index: u32) -> Collection<&'static str> {
        match index {
            0 => page(0, &["a", "b"], 3),
            1 => page(1, &["c", "d"], 3),
            2 => page(2, &["e"], 3),
            _ => panic!("page {index} does not exist"),
        }
    }

    #[test]
    fn concatenates_pages_in_order() {
        let mut calls = Vec::new();

        let items = collect_all(|index| {
            calls.push(index);
            Ok::<_, String>(three_pages(index))
        })
        .unwrap();

        assert_eq!(items, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(calls, vec![0, 1, 2]);
    }

    #[test]
    fn keeps_partial_results_on_failure() {
        let mut calls = Vec::new();

        let err = collect_all(|index| {
            calls.push(index);
            match index {
                0 => Ok(page(0, &["a", "b"], 3)),
                _ => Err("page 1 failed".to_string()),
            }
        })
        .unwrap_err();

        assert_eq!(err.partial, vec!["a", "b"]);
        assert_eq!(err.source, "page 1 failed");
        assert_eq!(calls, vec![0, 1]);
    }

    #[test]
    fn failure_on_first_page_has_no_partial_results() {
        let err = collect_all::<&str, _, _>(|_| Err("down")).unwrap_err();
        assert!(err.partial.is_empty());
    }

    #[test]
    fn empty_collection_stops_after_one_request() {
        let mut calls = 0;

        let items = collect_all(|index| {
            calls += 1;
            Ok::<_, String>(page(index, &[], 0))
        })
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(calls, 1);
    }

    #[test]
    fn total_pages_is_read_from_every_response() {
        // The collection shrinks from 3 pages to 2 after the first request.
        let mut calls = Vec::new();

        let items = collect_all(|index| {
            calls.push(index);
            Ok::<_, String>(match index {
                0 => page(0, &["a", "b"], 3),
                _ => page(1, &["c"], 2),
            })
        })
        .unwrap();

        assert_eq!(items, vec!["a", "b", "c"]);
        assert_eq!(calls, vec![0, 1]);
    }

    #[tokio::test]
    async fn async_walk_matches_blocking_walk() {
        let mut calls = Vec::new();

        let items = collect_all_async(|index| {
            calls.push(index);
            async move { Ok::<_, String>(three_pages(index)) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(calls, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn async_walk_never_requests_past_a_failure() {
        let mut calls = Vec::new();

        let err = collect_all_async(|index| {
            calls.push(index);
            async move {
                match index {
                    0 => Ok(page(0, &["a", "b"], 3)),
                    _ => Err("boom"),
                }
            }
        })
        .await
        .unwrap_err();

        assert_eq!(err.partial, vec!["a", "b"]);
        assert_eq!(calls, vec![0, 1]);
        assert_eq!(err.to_string(), "pagination stopped after 2 items: boom");
    }

    #[test]
    fn query_string_encoding() {
        let query = ListQuery::new()
            .with_size(50)
            .with_sort("createdDate,desc")
            .with_status(ContentStatus::Archived)
            .at_page(3);

        assert_eq!(
            query.to_query_string(),
            "page=3&size=50&status=ARCHIVED&sort=createdDate,desc"
        );
    }

    #[test]
    fn query_string_includes_item_filters() {
        let query = ListQuery {
            folder_id: Some("folder 1".into()),
            exclude_hierarchical_children: true,
            ..ListQuery::default()
        };

        assert_eq!(
            query.to_query_string(),
            "page=0&excludeHierarchicalChildren=true&folderId=folder+1"
        );
    }

    #[test]
    fn item_defaults_apply_only_without_size_or_basic_projection() {
        assert_eq!(
            ListQuery::new().with_item_defaults().size,
            Some(DEFAULT_ITEM_PAGE_SIZE)
        );
        assert_eq!(ListQuery::new().with_size(20).with_item_defaults().size, Some(20));
        assert_eq!(
            ListQuery::new()
                .with_projection(Projection::Basic)
                .with_item_defaults()
                .size,
            None
        );
    }
}
