//! Lazily paginated item streams.
//!
//! ```no_run
//! use futures_util::StreamExt;
//! use hubkit_core::pagination::ListQuery;
//! use hubkit_core::resources::Hub;
//! use hubkit_http::{ContentClient, endpoints};
//!
//! # async fn example(client: ContentClient) -> Result<(), hubkit_core::Error> {
//! let mut hubs = client.stream_all::<Hub>(endpoints::HUBS, ListQuery::new());
//!
//! while let Some(hub) = hubs.next().await {
//!     println!("{}", hub?.name);
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use tracing::trace;

use hubkit_core::{Collection, ItemStream, Result};

/// A stream of items fetched page by page.
///
/// The next page is requested only once the items of the current one
/// have been consumed. The stream ends after the last page, or right after
/// yielding the first error.
pub struct ItemPages<T> {
    inner: Pin<Box<dyn ItemStream<T>>>,
}

impl<T> ItemPages<T> {
    fn new<S>(stream: S) -> Self
    where
        S: ItemStream<T> + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }
}

impl<T> Stream for ItemPages<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Stream every item of a paginated endpoint.
///
/// `fetch` is called with page indices 0, 1, 2, ... as long as the last
/// response reports more pages.
pub fn stream_all<T, F, Fut>(mut fetch: F) -> ItemPages<T>
where
    T: Send + 'static,
    F: FnMut(u32) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Collection<T>>> + Send,
{
    let stream = async_stream::stream! {
        let mut page_index = 0;

        loop {
            match fetch(page_index).await {
                Ok(page) => {
                    let total_pages = page.page.total_pages;
                    trace!(page_index, total_pages, items = page.items.len(), "page fetched");

                    for item in page.items {
                        yield Ok(item);
                    }

                    if page_index + 1 < total_pages {
                        page_index += 1;
                    } else {
                        break;
                    }
                }
                Err(err) => {
                    yield Err(err);
                    break;
                }
            }
        }
    };

    ItemPages::new(stream)
}
